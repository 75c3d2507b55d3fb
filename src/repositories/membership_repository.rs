use crate::models::{ClientMembership, MembershipPlan, MembershipStatus, ServiceError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn find_plan(&self, id: i64) -> Result<Option<MembershipPlan>, ServiceError>;
    async fn find_plans(&self) -> Result<Vec<MembershipPlan>, ServiceError>;
    async fn save_plan(&self, plan: &MembershipPlan) -> Result<i64, ServiceError>;
    async fn delete_plan(&self, id: i64) -> Result<(), ServiceError>;
    async fn count_enrollments(&self, plan_id: i64) -> Result<i64, ServiceError>;
    async fn find_enrollment(&self, id: i64) -> Result<Option<ClientMembership>, ServiceError>;
    async fn find_enrollments_for_client(&self, client_id: i64) -> Result<Vec<ClientMembership>, ServiceError>;
    async fn insert_enrollment(
        &self,
        client_id: i64,
        plan_id: i64,
        started_at: NaiveDateTime,
    ) -> Result<i64, ServiceError>;
    async fn cancel_enrollment(&self, id: i64, cancelled_at: NaiveDateTime) -> Result<(), ServiceError>;
}

pub struct SqliteMembershipRepository {
    pool: SqlitePool,
}

impl SqliteMembershipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for SqliteMembershipRepository {
    async fn find_plan(&self, id: i64) -> Result<Option<MembershipPlan>, ServiceError> {
        let plan = sqlx::query_as::<_, MembershipPlan>(
            "SELECT id, name, description, monthly_price_cents, is_active FROM membership_plans WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn find_plans(&self) -> Result<Vec<MembershipPlan>, ServiceError> {
        let plans = sqlx::query_as::<_, MembershipPlan>(
            "SELECT id, name, description, monthly_price_cents, is_active FROM membership_plans
             ORDER BY monthly_price_cents, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    async fn save_plan(&self, plan: &MembershipPlan) -> Result<i64, ServiceError> {
        if plan.id == 0 {
            let result = sqlx::query(
                "INSERT INTO membership_plans (name, description, monthly_price_cents, is_active)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&plan.name)
            .bind(&plan.description)
            .bind(plan.monthly_price_cents)
            .bind(plan.is_active)
            .execute(&self.pool)
            .await?;

            Ok(result.last_insert_rowid())
        } else {
            sqlx::query(
                "UPDATE membership_plans SET name = ?, description = ?, monthly_price_cents = ?, is_active = ?
                 WHERE id = ?",
            )
            .bind(&plan.name)
            .bind(&plan.description)
            .bind(plan.monthly_price_cents)
            .bind(plan.is_active)
            .bind(plan.id)
            .execute(&self.pool)
            .await?;

            Ok(plan.id)
        }
    }

    async fn delete_plan(&self, id: i64) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM membership_plans WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_enrollments(&self, plan_id: i64) -> Result<i64, ServiceError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM client_memberships WHERE plan_id = ?")
            .bind(plan_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_enrollment(&self, id: i64) -> Result<Option<ClientMembership>, ServiceError> {
        let membership = sqlx::query_as::<_, ClientMembership>(
            "SELECT id, client_id, plan_id, status, started_at, cancelled_at FROM client_memberships WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn find_enrollments_for_client(&self, client_id: i64) -> Result<Vec<ClientMembership>, ServiceError> {
        let memberships = sqlx::query_as::<_, ClientMembership>(
            "SELECT id, client_id, plan_id, status, started_at, cancelled_at FROM client_memberships
             WHERE client_id = ? ORDER BY started_at DESC, id DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    async fn insert_enrollment(
        &self,
        client_id: i64,
        plan_id: i64,
        started_at: NaiveDateTime,
    ) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO client_memberships (client_id, plan_id, status, started_at) VALUES (?, ?, ?, ?)",
        )
        .bind(client_id)
        .bind(plan_id)
        .bind(MembershipStatus::Active)
        .bind(started_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn cancel_enrollment(&self, id: i64, cancelled_at: NaiveDateTime) -> Result<(), ServiceError> {
        sqlx::query("UPDATE client_memberships SET status = ?, cancelled_at = ? WHERE id = ?")
            .bind(MembershipStatus::Cancelled)
            .bind(cancelled_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
