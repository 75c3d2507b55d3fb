use crate::models::{local_now, Provider, ProviderForm, ServiceError, WeeklyHoursForm, WorkingHours};
use crate::repositories::ProviderRepository;
use std::sync::Arc;

pub struct ProviderService {
    repository: Arc<dyn ProviderRepository>,
}

impl ProviderService {
    pub fn new(repository: Arc<dyn ProviderRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_provider(&self, form: &ProviderForm) -> Result<Provider, ServiceError> {
        let provider = Provider::new(
            &form.name,
            form.title.clone(),
            form.email.clone(),
            form.is_active.unwrap_or(true),
            local_now(),
        )
        .map_err(ServiceError::ValidationError)?;

        let id = self.repository.save(&provider).await?;
        tracing::info!("Created provider {} ({})", id, provider.name);

        self.get_provider(id).await
    }

    pub async fn list_providers(&self) -> Result<Vec<Provider>, ServiceError> {
        self.repository.find_all().await
    }

    pub async fn get_provider(&self, id: i64) -> Result<Provider, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Provider {} not found", id)))
    }

    pub async fn update_provider(&self, id: i64, form: &ProviderForm) -> Result<Provider, ServiceError> {
        let existing = self.get_provider(id).await?;

        let mut provider = Provider::new(
            &form.name,
            form.title.clone(),
            form.email.clone(),
            form.is_active.unwrap_or(existing.is_active),
            existing.created_at,
        )
        .map_err(ServiceError::ValidationError)?;
        provider.id = id;

        self.repository.save(&provider).await?;
        tracing::info!("Updated provider {}", id);

        Ok(provider)
    }

    pub async fn delete_provider(&self, id: i64) -> Result<(), ServiceError> {
        let provider = self.get_provider(id).await?;

        let booked = self.repository.count_appointments(id).await?;
        if booked > 0 {
            return Err(ServiceError::Conflict(format!(
                "Provider {} has {} appointment(s); deactivate instead of deleting",
                provider.name, booked
            )));
        }

        self.repository.delete(id).await?;
        tracing::info!("Deleted provider {} ({})", id, provider.name);
        Ok(())
    }

    pub async fn working_hours(&self, id: i64) -> Result<WorkingHours, ServiceError> {
        self.get_provider(id).await?;
        self.repository.working_hours(id).await
    }

    pub async fn set_working_hours(&self, id: i64, form: &WeeklyHoursForm) -> Result<WorkingHours, ServiceError> {
        self.get_provider(id).await?;

        let hours = form.to_working_hours().map_err(ServiceError::ValidationError)?;
        self.repository.replace_working_hours(id, &hours).await?;

        if hours.is_closed_all_week() {
            tracing::warn!("Provider {} now has no working hours", id);
        } else {
            tracing::info!("Updated working hours for provider {}", id);
        }
        Ok(hours)
    }
}
