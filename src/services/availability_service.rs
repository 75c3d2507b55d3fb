use crate::models::{
    day_bounds, evaluate, free_slots, normalize_range, AvailabilityDecision, ServiceError, Slot, MAX_SERVICE_MINUTES,
    MIN_SERVICE_MINUTES,
};
use crate::repositories::{AppointmentRepository, ProviderRepository, ServiceRepository};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Arc;

pub struct AvailabilityService {
    providers: Arc<dyn ProviderRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    services: Arc<dyn ServiceRepository>,
    slot_step: Duration,
}

impl AvailabilityService {
    pub fn new(
        providers: Arc<dyn ProviderRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        services: Arc<dyn ServiceRepository>,
        slot_step_minutes: i64,
    ) -> Self {
        Self {
            providers,
            appointments,
            services,
            slot_step: Duration::minutes(slot_step_minutes),
        }
    }

    async fn ensure_provider(&self, provider_id: i64) -> Result<(), ServiceError> {
        self.providers
            .find_by_id(provider_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Provider {} not found", provider_id)))
    }

    /// Whether `[start, end)` can be booked with the provider. `exclude_id`
    /// names an appointment to ignore, used when it is being moved.
    pub async fn check(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<AvailabilityDecision, ServiceError> {
        self.ensure_provider(provider_id).await?;
        let (start, end) = normalize_range(start, end).map_err(ServiceError::ValidationError)?;

        let hours = self.providers.working_hours(provider_id).await?;
        let existing = self
            .appointments
            .find_for_provider(provider_id, start, end)
            .await?;

        Ok(evaluate(start, end, &hours, &existing, exclude_id))
    }

    /// Length of the slots to offer: the service's duration when a service is
    /// named, otherwise the explicit duration.
    async fn slot_length(&self, service_id: Option<i64>, duration_minutes: Option<i64>) -> Result<i64, ServiceError> {
        if let Some(service_id) = service_id {
            let service = self
                .services
                .find_by_id(service_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", service_id)))?;
            return Ok(service.duration_minutes);
        }

        match duration_minutes {
            Some(minutes) if (MIN_SERVICE_MINUTES..=MAX_SERVICE_MINUTES).contains(&minutes) => Ok(minutes),
            Some(minutes) => Err(ServiceError::ValidationError(format!(
                "Duration must be between {} and {} minutes, got {}",
                MIN_SERVICE_MINUTES, MAX_SERVICE_MINUTES, minutes
            ))),
            None => Err(ServiceError::ValidationError(
                "Either service_id or duration_minutes is required".to_string(),
            )),
        }
    }

    pub async fn slots(
        &self,
        provider_id: i64,
        date: NaiveDate,
        service_id: Option<i64>,
        duration_minutes: Option<i64>,
    ) -> Result<(i64, Vec<Slot>), ServiceError> {
        self.ensure_provider(provider_id).await?;
        let minutes = self.slot_length(service_id, duration_minutes).await?;

        let hours = self.providers.working_hours(provider_id).await?;
        let (day_start, day_end) = day_bounds(date).map_err(ServiceError::ValidationError)?;
        let existing = self
            .appointments
            .find_for_provider(provider_id, day_start, day_end)
            .await?;

        let slots = free_slots(date, Duration::minutes(minutes), self.slot_step, &hours, &existing);
        Ok((minutes, slots))
    }
}
