use crate::models::{
    local_now, ClientMembership, MembershipPlan, MembershipPlanForm, MembershipStatus, ServiceError,
};
use crate::repositories::{ClientRepository, MembershipRepository};
use std::sync::Arc;

pub struct MembershipService {
    repository: Arc<dyn MembershipRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl MembershipService {
    pub fn new(repository: Arc<dyn MembershipRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { repository, clients }
    }

    pub async fn create_plan(&self, form: &MembershipPlanForm) -> Result<MembershipPlan, ServiceError> {
        let plan = MembershipPlan::new(
            &form.name,
            form.description.clone(),
            form.monthly_price_cents,
            form.is_active.unwrap_or(true),
        )
        .map_err(ServiceError::ValidationError)?;

        let id = self.repository.save_plan(&plan).await?;
        tracing::info!("Created membership plan {} ({})", id, plan.name);

        self.get_plan(id).await
    }

    pub async fn list_plans(&self) -> Result<Vec<MembershipPlan>, ServiceError> {
        self.repository.find_plans().await
    }

    pub async fn get_plan(&self, id: i64) -> Result<MembershipPlan, ServiceError> {
        self.repository
            .find_plan(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Membership plan {} not found", id)))
    }

    pub async fn update_plan(&self, id: i64, form: &MembershipPlanForm) -> Result<MembershipPlan, ServiceError> {
        let existing = self.get_plan(id).await?;

        let mut plan = MembershipPlan::new(
            &form.name,
            form.description.clone(),
            form.monthly_price_cents,
            form.is_active.unwrap_or(existing.is_active),
        )
        .map_err(ServiceError::ValidationError)?;
        plan.id = id;

        self.repository.save_plan(&plan).await?;
        tracing::info!("Updated membership plan {}", id);

        Ok(plan)
    }

    pub async fn delete_plan(&self, id: i64) -> Result<(), ServiceError> {
        let plan = self.get_plan(id).await?;

        let enrolled = self.repository.count_enrollments(id).await?;
        if enrolled > 0 {
            return Err(ServiceError::Conflict(format!(
                "Plan {} has {} enrollment(s); deactivate instead of deleting",
                plan.name, enrolled
            )));
        }

        self.repository.delete_plan(id).await?;
        tracing::info!("Deleted membership plan {} ({})", id, plan.name);
        Ok(())
    }

    pub async fn enroll(&self, client_id: i64, plan_id: i64) -> Result<ClientMembership, ServiceError> {
        let client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", client_id)))?;
        if client.is_archived() {
            return Err(ServiceError::ValidationError(format!("Client {} is archived", client_id)));
        }

        let plan = self.get_plan(plan_id).await?;
        if !plan.is_active {
            return Err(ServiceError::ValidationError(format!(
                "Plan {} is not open for enrollment",
                plan.name
            )));
        }

        let current = self.repository.find_enrollments_for_client(client_id).await?;
        if current.iter().any(|m| m.status == MembershipStatus::Active) {
            return Err(ServiceError::Conflict(format!(
                "Client {} already holds an active membership",
                client_id
            )));
        }

        let id = self
            .repository
            .insert_enrollment(client_id, plan_id, local_now())
            .await?;
        tracing::info!("Enrolled client {} in plan {} ({})", client_id, plan.name, id);

        self.get_enrollment(id).await
    }

    pub async fn get_enrollment(&self, id: i64) -> Result<ClientMembership, ServiceError> {
        self.repository
            .find_enrollment(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Membership {} not found", id)))
    }

    pub async fn memberships_for_client(&self, client_id: i64) -> Result<Vec<ClientMembership>, ServiceError> {
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Client {} not found", client_id)));
        }
        self.repository.find_enrollments_for_client(client_id).await
    }

    pub async fn cancel(&self, id: i64) -> Result<ClientMembership, ServiceError> {
        let membership = self.get_enrollment(id).await?;
        if membership.status == MembershipStatus::Cancelled {
            return Err(ServiceError::Conflict(format!("Membership {} is already cancelled", id)));
        }

        self.repository.cancel_enrollment(id, local_now()).await?;
        tracing::info!("Cancelled membership {} of client {}", id, membership.client_id);

        self.get_enrollment(id).await
    }
}
