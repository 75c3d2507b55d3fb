use crate::models::{
    day_bounds, local_now, normalize_range, shift, Appointment, AppointmentForm, AppointmentStatus, AppointmentUpdateForm,
    NewAppointment, ProviderAgenda, RejectionReason, ServiceError,
};
use crate::repositories::{AppointmentRepository, ClientRepository, ProviderRepository, ServiceRepository};
use crate::services::AvailabilityService;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of a booking attempt. A rejection is an expected outcome.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(Appointment),
    Rejected(RejectionReason),
}

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    clients: Arc<dyn ClientRepository>,
    providers: Arc<dyn ProviderRepository>,
    services: Arc<dyn ServiceRepository>,
    availability: Arc<AvailabilityService>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        clients: Arc<dyn ClientRepository>,
        providers: Arc<dyn ProviderRepository>,
        services: Arc<dyn ServiceRepository>,
        availability: Arc<AvailabilityService>,
    ) -> Self {
        Self {
            appointments,
            clients,
            providers,
            services,
            availability,
        }
    }

    pub async fn book(&self, form: &AppointmentForm) -> Result<BookingOutcome, ServiceError> {
        let client = self
            .clients
            .find_by_id(form.client_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", form.client_id)))?;
        if client.is_archived() {
            return Err(ServiceError::ValidationError(format!(
                "Client {} is archived",
                form.client_id
            )));
        }

        let provider = self
            .providers
            .find_by_id(form.provider_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Provider {} not found", form.provider_id)))?;
        if !provider.is_active {
            return Err(ServiceError::ValidationError(format!(
                "Provider {} is not taking bookings",
                provider.name
            )));
        }

        let service = self
            .services
            .find_by_id(form.service_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", form.service_id)))?;
        if !service.is_active {
            return Err(ServiceError::ValidationError(format!(
                "Service {} is no longer offered",
                service.name
            )));
        }

        let end_at = match form.end_at {
            Some(end) => end,
            None => shift(form.start_at, service.duration()).map_err(ServiceError::ValidationError)?,
        };
        let appointment = NewAppointment::new(
            client.id,
            provider.id,
            service.id,
            form.start_at,
            end_at,
            form.notes.clone(),
        )
        .map_err(ServiceError::ValidationError)?;

        let decision = self
            .availability
            .check(provider.id, appointment.start_at, appointment.end_at, None)
            .await?;
        if let Some(reason) = decision.reason {
            tracing::info!(
                "Rejected booking for provider {} at {}: {}",
                provider.id,
                appointment.start_at,
                reason.as_str()
            );
            return Ok(BookingOutcome::Rejected(reason));
        }

        let id = match self.appointments.insert(&appointment, local_now()).await {
            Ok(id) => id,
            Err(ServiceError::BookingConflict) => {
                tracing::warn!(
                    "Concurrent booking for provider {} at {} lost the race",
                    provider.id,
                    appointment.start_at
                );
                return Ok(BookingOutcome::Rejected(RejectionReason::Conflict));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            "Booked appointment {} for client {} with provider {} at {}",
            id,
            client.id,
            provider.id,
            appointment.start_at
        );
        Ok(BookingOutcome::Booked(self.get_appointment(id).await?))
    }

    pub async fn list_appointments(
        &self,
        date: Option<NaiveDate>,
        provider_id: Option<i64>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let (from, to) = match date {
            Some(date) => {
                let (from, to) = day_bounds(date).map_err(ServiceError::ValidationError)?;
                (Some(from), Some(to))
            }
            None => (None, None),
        };
        self.appointments.find_between(from, to, provider_id, status).await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, ServiceError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Appointment {} not found", id)))
    }

    /// Move an appointment and/or replace its notes. Moving only the start
    /// keeps the original length.
    pub async fn reschedule(&self, id: i64, form: &AppointmentUpdateForm) -> Result<BookingOutcome, ServiceError> {
        let current = self.get_appointment(id).await?;
        if current.status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "Appointment {} is {} and can no longer be changed",
                id, current.status
            )));
        }

        let length = current.end_at - current.start_at;
        let start_at = form.start_at.unwrap_or(current.start_at);
        let end_at = match (form.start_at, form.end_at) {
            (_, Some(end)) => end,
            (Some(start), None) => shift(start, length).map_err(ServiceError::ValidationError)?,
            (None, None) => current.end_at,
        };
        let (start_at, end_at) = normalize_range(start_at, end_at).map_err(ServiceError::ValidationError)?;

        let moved = start_at != current.start_at || end_at != current.end_at;
        if moved {
            let decision = self
                .availability
                .check(current.provider_id, start_at, end_at, Some(id))
                .await?;
            if let Some(reason) = decision.reason {
                return Ok(BookingOutcome::Rejected(reason));
            }
        }

        let notes = form.notes.as_deref().or(current.notes.as_deref());
        match self
            .appointments
            .update_schedule(id, start_at, end_at, notes, local_now())
            .await
        {
            Ok(()) => {}
            Err(ServiceError::BookingConflict) => return Ok(BookingOutcome::Rejected(RejectionReason::Conflict)),
            Err(e) => return Err(e),
        }

        if moved {
            tracing::info!("Rescheduled appointment {} to {} - {}", id, start_at, end_at);
        }
        Ok(BookingOutcome::Booked(self.get_appointment(id).await?))
    }

    pub async fn change_status(&self, id: i64, status: AppointmentStatus) -> Result<Appointment, ServiceError> {
        let current = self.get_appointment(id).await?;
        if current.status == status {
            return Ok(current);
        }
        if !current.status.can_transition_to(status) {
            return Err(ServiceError::Conflict(format!(
                "Cannot change appointment {} from {} to {}",
                id, current.status, status
            )));
        }

        self.appointments.update_status(id, status, local_now()).await?;
        tracing::info!("Appointment {} is now {}", id, status);

        self.get_appointment(id).await
    }

    /// Day view: appointments grouped per provider, plus a count per status.
    pub async fn agenda(&self, date: NaiveDate) -> Result<(Vec<ProviderAgenda>, BTreeMap<String, i64>), ServiceError> {
        let appointments = self.list_appointments(Some(date), None, None).await?;

        let mut counts: BTreeMap<String, i64> = [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ]
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
        for appointment in &appointments {
            *counts.entry(appointment.status.as_str().to_string()).or_insert(0) += 1;
        }

        let mut agenda: Vec<ProviderAgenda> = self
            .providers
            .find_active()
            .await?
            .into_iter()
            .map(|p| ProviderAgenda {
                provider_id: p.id,
                provider_name: p.name,
                appointments: Vec::new(),
            })
            .collect();

        for appointment in appointments {
            if let Some(entry) = agenda.iter_mut().find(|a| a.provider_id == appointment.provider_id) {
                entry.appointments.push(appointment);
                continue;
            }
            // Inactive providers still show up when they have bookings that day.
            let name = self
                .providers
                .find_by_id(appointment.provider_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_default();
            agenda.push(ProviderAgenda {
                provider_id: appointment.provider_id,
                provider_name: name,
                appointments: vec![appointment],
            });
        }

        Ok((agenda, counts))
    }
}
