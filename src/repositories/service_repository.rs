use crate::models::{Service, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;

const SERVICE_COLUMNS: &str = "id, name, category, description, duration_minutes, price_cents, is_active";

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, ServiceError>;
    async fn find_all(&self, active_only: bool) -> Result<Vec<Service>, ServiceError>;
    async fn save(&self, service: &Service) -> Result<i64, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
    async fn count_appointments(&self, id: i64) -> Result<i64, ServiceError>;
}

pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Service>, ServiceError> {
        let sql = format!("SELECT {} FROM services WHERE id = ?", SERVICE_COLUMNS);
        let service = sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    async fn find_all(&self, active_only: bool) -> Result<Vec<Service>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM services WHERE (? = 0 OR is_active = 1) ORDER BY category, name",
            SERVICE_COLUMNS
        );
        let services = sqlx::query_as::<_, Service>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }

    async fn save(&self, service: &Service) -> Result<i64, ServiceError> {
        if service.id == 0 {
            let result = sqlx::query(
                "INSERT INTO services (name, category, description, duration_minutes, price_cents, is_active)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&service.name)
            .bind(&service.category)
            .bind(&service.description)
            .bind(service.duration_minutes)
            .bind(service.price_cents)
            .bind(service.is_active)
            .execute(&self.pool)
            .await?;

            Ok(result.last_insert_rowid())
        } else {
            sqlx::query(
                "UPDATE services SET name = ?, category = ?, description = ?, duration_minutes = ?,
                        price_cents = ?, is_active = ?
                 WHERE id = ?",
            )
            .bind(&service.name)
            .bind(&service.category)
            .bind(&service.description)
            .bind(service.duration_minutes)
            .bind(service.price_cents)
            .bind(service.is_active)
            .bind(service.id)
            .execute(&self.pool)
            .await?;

            Ok(service.id)
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_appointments(&self, id: i64) -> Result<i64, ServiceError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE service_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
