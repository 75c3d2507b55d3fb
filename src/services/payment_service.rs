use crate::models::{local_now, NewPayment, Payment, PaymentForm, PaymentStatus, ServiceError};
use crate::repositories::{AppointmentRepository, ClientRepository, PaymentRepository};
use std::sync::Arc;

pub struct PaymentService {
    repository: Arc<dyn PaymentRepository>,
    clients: Arc<dyn ClientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl PaymentService {
    pub fn new(
        repository: Arc<dyn PaymentRepository>,
        clients: Arc<dyn ClientRepository>,
        appointments: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            repository,
            clients,
            appointments,
        }
    }

    pub async fn record_payment(&self, form: &PaymentForm) -> Result<Payment, ServiceError> {
        if self.clients.find_by_id(form.client_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Client {} not found", form.client_id)));
        }

        if let Some(appointment_id) = form.appointment_id {
            let appointment = self
                .appointments
                .find_by_id(appointment_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Appointment {} not found", appointment_id)))?;
            if appointment.client_id != form.client_id {
                return Err(ServiceError::ValidationError(format!(
                    "Appointment {} belongs to a different client",
                    appointment_id
                )));
            }
        }

        let payment = NewPayment::new(
            form.client_id,
            form.appointment_id,
            form.amount_cents,
            form.currency.as_deref(),
            form.method,
            form.external_id.clone(),
        )
        .map_err(ServiceError::ValidationError)?;

        let id = self.repository.insert(&payment, local_now()).await?;
        tracing::info!(
            "Recorded payment {} of {} {} for client {} ({})",
            id,
            payment.amount_cents,
            payment.currency,
            payment.client_id,
            payment.status.as_str()
        );

        self.get_payment(id).await
    }

    pub async fn list_payments(&self, client_id: Option<i64>) -> Result<Vec<Payment>, ServiceError> {
        self.repository.find_all(client_id).await
    }

    pub async fn get_payment(&self, id: i64) -> Result<Payment, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payment {} not found", id)))
    }

    pub async fn refund(&self, id: i64) -> Result<Payment, ServiceError> {
        let payment = self.get_payment(id).await?;
        if payment.status != PaymentStatus::Succeeded {
            return Err(ServiceError::Conflict(format!(
                "Only succeeded payments can be refunded; payment {} is {}",
                id,
                payment.status.as_str()
            )));
        }

        self.repository
            .update_status(id, PaymentStatus::Refunded, local_now())
            .await?;
        tracing::info!("Refunded payment {}", id);

        self.get_payment(id).await
    }

    /// Apply a status reported by the processor. Returns `None` when no
    /// payment carries `external_id`.
    pub async fn apply_processor_status(
        &self,
        external_id: &str,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, ServiceError> {
        let Some(payment) = self.repository.find_by_external_id(external_id).await? else {
            return Ok(None);
        };

        if payment.status != status {
            self.repository
                .update_status(payment.id, status, local_now())
                .await?;
            tracing::info!(
                "Payment {} ({}) moved from {} to {}",
                payment.id,
                external_id,
                payment.status.as_str(),
                status.as_str()
            );
        }

        self.get_payment(payment.id).await.map(Some)
    }
}
