use crate::models::{Service, ServiceCategory, ServiceError, ServiceForm};
use crate::repositories::ServiceRepository;
use std::sync::Arc;

/// Treatments offered by the spa
pub struct CatalogService {
    repository: Arc<dyn ServiceRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    fn build(form: &ServiceForm, is_active: bool) -> Result<Service, ServiceError> {
        Service::new(
            &form.name,
            &form.category,
            form.description.clone(),
            form.duration_minutes,
            form.price_cents,
            is_active,
        )
        .map_err(ServiceError::ValidationError)
    }

    pub async fn create_service(&self, form: &ServiceForm) -> Result<Service, ServiceError> {
        let service = Self::build(form, form.is_active.unwrap_or(true))?;

        let id = self.repository.save(&service).await?;
        tracing::info!("Created service {} ({})", id, service.name);

        self.get_service(id).await
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        self.repository.find_all(false).await
    }

    pub async fn get_service(&self, id: i64) -> Result<Service, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", id)))
    }

    pub async fn update_service(&self, id: i64, form: &ServiceForm) -> Result<Service, ServiceError> {
        let existing = self.get_service(id).await?;

        let mut service = Self::build(form, form.is_active.unwrap_or(existing.is_active))?;
        service.id = id;

        self.repository.save(&service).await?;
        tracing::info!("Updated service {}", id);

        Ok(service)
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), ServiceError> {
        let service = self.get_service(id).await?;

        let booked = self.repository.count_appointments(id).await?;
        if booked > 0 {
            return Err(ServiceError::Conflict(format!(
                "Service {} has {} appointment(s); deactivate instead of deleting",
                service.name, booked
            )));
        }

        self.repository.delete(id).await?;
        tracing::info!("Deleted service {} ({})", id, service.name);
        Ok(())
    }

    /// Public menu: active services grouped by category, categories in
    /// alphabetical order.
    pub async fn public_catalog(&self) -> Result<Vec<ServiceCategory>, ServiceError> {
        let services = self.repository.find_all(true).await?;
        Ok(group_by_category(services))
    }
}

fn group_by_category(services: Vec<Service>) -> Vec<ServiceCategory> {
    let mut categories: Vec<ServiceCategory> = Vec::new();
    for service in services {
        match categories.iter_mut().find(|c| c.category == service.category) {
            Some(group) => group.services.push(service),
            None => categories.push(ServiceCategory {
                category: service.category.clone(),
                services: vec![service],
            }),
        }
    }
    categories.sort_by(|a, b| a.category.cmp(&b.category));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, category: &str) -> Service {
        Service::new(name, category, None, 30, 10_000, true).unwrap()
    }

    #[test]
    fn groups_keep_service_order_within_category() {
        let grouped = group_by_category(vec![
            service("Botox", "Injectables"),
            service("HydraFacial", "Facials"),
            service("Filler", "Injectables"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].category, "Facials");
        let names: Vec<_> = grouped[1].services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Botox", "Filler"]);
    }
}
