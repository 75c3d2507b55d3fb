use crate::models::{local_now, ConsentForm, ConsentSubmission, ServiceError};
use crate::repositories::{ClientRepository, ConsentRepository};
use std::sync::Arc;

pub struct ConsentService {
    repository: Arc<dyn ConsentRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl ConsentService {
    pub fn new(repository: Arc<dyn ConsentRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { repository, clients }
    }

    pub async fn record_consent(&self, submission: &ConsentSubmission) -> Result<ConsentForm, ServiceError> {
        let form_type = submission.form_type.trim();
        let signed_name = submission.signed_name.trim();
        if form_type.is_empty() || signed_name.is_empty() || submission.content.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "form_type, signed_name and content are required".to_string(),
            ));
        }

        let client = self
            .clients
            .find_by_id(submission.client_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", submission.client_id)))?;
        if client.is_archived() {
            return Err(ServiceError::ValidationError(format!(
                "Client {} is archived",
                client.id
            )));
        }

        let id = self
            .repository
            .insert(client.id, form_type, signed_name, &submission.content, local_now())
            .await?;
        tracing::info!("Client {} signed {} consent ({})", client.id, form_type, id);

        self.get_consent(id).await
    }

    pub async fn consents_for_client(&self, client_id: i64) -> Result<Vec<ConsentForm>, ServiceError> {
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Client {} not found", client_id)));
        }
        self.repository.find_for_client(client_id).await
    }

    pub async fn get_consent(&self, id: i64) -> Result<ConsentForm, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Consent form {} not found", id)))
    }

    pub async fn revoke_consent(&self, id: i64) -> Result<(), ServiceError> {
        let form = self.get_consent(id).await?;
        self.repository.delete(id).await?;
        tracing::info!("Revoked {} consent {} of client {}", form.form_type, id, form.client_id);
        Ok(())
    }
}
