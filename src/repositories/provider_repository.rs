use crate::models::{
    parse_time, Provider, ServiceError, TimeWindow, WorkingHours, WorkingHoursRow, TIME_FORMAT,
};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Provider>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Provider>, ServiceError>;
    async fn find_active(&self) -> Result<Vec<Provider>, ServiceError>;
    async fn save(&self, provider: &Provider) -> Result<i64, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
    async fn count_appointments(&self, id: i64) -> Result<i64, ServiceError>;
    async fn working_hours(&self, id: i64) -> Result<WorkingHours, ServiceError>;
    async fn replace_working_hours(&self, id: i64, hours: &WorkingHours) -> Result<(), ServiceError>;
}

pub struct SqliteProviderRepository {
    pool: SqlitePool,
}

impl SqliteProviderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProviderRepository for SqliteProviderRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Provider>, ServiceError> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT id, name, title, email, is_active, created_at FROM providers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(provider)
    }

    async fn find_all(&self) -> Result<Vec<Provider>, ServiceError> {
        let providers = sqlx::query_as::<_, Provider>(
            "SELECT id, name, title, email, is_active, created_at FROM providers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(providers)
    }

    async fn find_active(&self) -> Result<Vec<Provider>, ServiceError> {
        let providers = sqlx::query_as::<_, Provider>(
            "SELECT id, name, title, email, is_active, created_at FROM providers
             WHERE is_active = 1 ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(providers)
    }

    async fn save(&self, provider: &Provider) -> Result<i64, ServiceError> {
        if provider.id == 0 {
            // Insert new provider
            let result = sqlx::query(
                "INSERT INTO providers (name, title, email, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&provider.name)
            .bind(&provider.title)
            .bind(&provider.email)
            .bind(provider.is_active)
            .bind(provider.created_at)
            .execute(&self.pool)
            .await?;

            Ok(result.last_insert_rowid())
        } else {
            // Update existing provider
            sqlx::query("UPDATE providers SET name = ?, title = ?, email = ?, is_active = ? WHERE id = ?")
                .bind(&provider.name)
                .bind(&provider.title)
                .bind(&provider.email)
                .bind(provider.is_active)
                .bind(provider.id)
                .execute(&self.pool)
                .await?;

            Ok(provider.id)
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM providers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_appointments(&self, id: i64) -> Result<i64, ServiceError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE provider_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn working_hours(&self, id: i64) -> Result<WorkingHours, ServiceError> {
        let rows = sqlx::query_as::<_, WorkingHoursRow>(
            "SELECT provider_id, weekday, open_time, close_time FROM provider_working_hours
             WHERE provider_id = ? ORDER BY weekday",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut hours = WorkingHours::new();
        for row in rows {
            let day = row.weekday().ok_or_else(|| {
                ServiceError::DatabaseError(format!("Invalid weekday {} for provider {}", row.weekday, id))
            })?;
            let window = parse_time(&row.open_time)
                .and_then(|open| TimeWindow::new(open, parse_time(&row.close_time)?))
                .map_err(ServiceError::DatabaseError)?;
            hours.set(day, Some(window));
        }

        Ok(hours)
    }

    async fn replace_working_hours(&self, id: i64, hours: &WorkingHours) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM provider_working_hours WHERE provider_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (day, window) in hours.iter() {
            if let Some(window) = window {
                sqlx::query(
                    "INSERT INTO provider_working_hours (provider_id, weekday, open_time, close_time)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(id)
                .bind(i64::from(day.num_days_from_monday()))
                .bind(window.open.format(TIME_FORMAT).to_string())
                .bind(window.close.format(TIME_FORMAT).to_string())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

