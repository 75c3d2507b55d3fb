use crate::models::{local_now, Appointment, Client, ClientDetails, ClientForm, ServiceError};
use crate::repositories::{AppointmentRepository, ClientRepository};
use std::sync::Arc;

pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepository>, appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            repository,
            appointments,
        }
    }

    fn details(form: &ClientForm) -> Result<ClientDetails, ServiceError> {
        ClientDetails::new(
            &form.first_name,
            &form.last_name,
            form.email.as_deref(),
            form.phone.as_deref(),
            form.date_of_birth,
            form.notes.clone(),
        )
        .map_err(ServiceError::ValidationError)
    }

    async fn ensure_email_free(&self, details: &ClientDetails, current_id: Option<i64>) -> Result<(), ServiceError> {
        if let Some(email) = &details.email {
            if let Some(existing) = self.repository.find_by_email(email).await? {
                if Some(existing.id) != current_id {
                    return Err(ServiceError::Conflict(format!(
                        "A client with email {} already exists",
                        email
                    )));
                }
            }
        }
        Ok(())
    }

    pub async fn create_client(&self, form: &ClientForm) -> Result<Client, ServiceError> {
        let details = Self::details(form)?;
        self.ensure_email_free(&details, None).await?;

        let id = self.repository.insert(&details, local_now()).await?;
        tracing::info!("Created client {} ({} {})", id, details.first_name, details.last_name);

        self.get_client(id).await
    }

    pub async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, ServiceError> {
        let search = search.map(str::trim).filter(|q| !q.is_empty());
        self.repository.find_active(search).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", id)))
    }

    pub async fn update_client(&self, id: i64, form: &ClientForm) -> Result<Client, ServiceError> {
        self.get_client(id).await?;
        let details = Self::details(form)?;
        self.ensure_email_free(&details, Some(id)).await?;

        self.repository.update(id, &details, local_now()).await?;
        tracing::info!("Updated client {}", id);

        self.get_client(id).await
    }

    pub async fn archive_client(&self, id: i64) -> Result<(), ServiceError> {
        let client = self.get_client(id).await?;
        if client.is_archived() {
            return Ok(());
        }

        self.repository.archive(id, local_now()).await?;
        tracing::info!("Archived client {} ({})", id, client.full_name());
        Ok(())
    }

    pub async fn appointment_history(&self, id: i64) -> Result<Vec<Appointment>, ServiceError> {
        self.get_client(id).await?;
        self.appointments.find_for_client(id).await
    }
}
