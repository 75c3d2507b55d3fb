use crate::models::{ConsentForm, ServiceError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

#[async_trait]
pub trait ConsentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ConsentForm>, ServiceError>;
    async fn find_for_client(&self, client_id: i64) -> Result<Vec<ConsentForm>, ServiceError>;
    async fn insert(
        &self,
        client_id: i64,
        form_type: &str,
        signed_name: &str,
        content: &str,
        signed_at: NaiveDateTime,
    ) -> Result<i64, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

pub struct SqliteConsentRepository {
    pool: SqlitePool,
}

impl SqliteConsentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsentRepository for SqliteConsentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ConsentForm>, ServiceError> {
        let form = sqlx::query_as::<_, ConsentForm>(
            "SELECT id, client_id, form_type, signed_name, content, signed_at FROM consent_forms WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(form)
    }

    async fn find_for_client(&self, client_id: i64) -> Result<Vec<ConsentForm>, ServiceError> {
        let forms = sqlx::query_as::<_, ConsentForm>(
            "SELECT id, client_id, form_type, signed_name, content, signed_at FROM consent_forms
             WHERE client_id = ? ORDER BY signed_at DESC, id DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(forms)
    }

    async fn insert(
        &self,
        client_id: i64,
        form_type: &str,
        signed_name: &str,
        content: &str,
        signed_at: NaiveDateTime,
    ) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO consent_forms (client_id, form_type, signed_name, content, signed_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(client_id)
        .bind(form_type)
        .bind(signed_name)
        .bind(content)
        .bind(signed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM consent_forms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
