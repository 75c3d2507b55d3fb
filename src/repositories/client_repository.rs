use crate::models::{Client, ClientDetails, ServiceError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

const CLIENT_COLUMNS: &str = "id, first_name, last_name, email, phone, date_of_birth, notes, \
                              created_at, updated_at, archived_at";

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, ServiceError>;
    async fn find_active(&self, search: Option<&str>) -> Result<Vec<Client>, ServiceError>;
    async fn insert(&self, details: &ClientDetails, now: NaiveDateTime) -> Result<i64, ServiceError>;
    async fn update(&self, id: i64, details: &ClientDetails, now: NaiveDateTime) -> Result<(), ServiceError>;
    async fn archive(&self, id: i64, now: NaiveDateTime) -> Result<(), ServiceError>;
    async fn count_active(&self) -> Result<i64, ServiceError>;
}

pub struct SqliteClientRepository {
    pool: SqlitePool,
}

impl SqliteClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ServiceError> {
        let sql = format!("SELECT {} FROM clients WHERE id = ?", CLIENT_COLUMNS);
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, ServiceError> {
        let sql = format!("SELECT {} FROM clients WHERE email = ?", CLIENT_COLUMNS);
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    async fn find_active(&self, search: Option<&str>) -> Result<Vec<Client>, ServiceError> {
        let pattern = search.map(|q| format!("%{}%", q.trim().to_lowercase()));
        let sql = format!(
            "SELECT {} FROM clients
             WHERE archived_at IS NULL
               AND (?1 IS NULL
                    OR lower(first_name) LIKE ?1
                    OR lower(last_name) LIKE ?1
                    OR lower(first_name || ' ' || last_name) LIKE ?1
                    OR email LIKE ?1
                    OR phone LIKE ?1)
             ORDER BY last_name, first_name",
            CLIENT_COLUMNS
        );
        let clients = sqlx::query_as::<_, Client>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    async fn insert(&self, details: &ClientDetails, now: NaiveDateTime) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO clients (first_name, last_name, email, phone, date_of_birth, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(details.date_of_birth)
        .bind(&details.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, details: &ClientDetails, now: NaiveDateTime) -> Result<(), ServiceError> {
        sqlx::query(
            "UPDATE clients SET first_name = ?, last_name = ?, email = ?, phone = ?, date_of_birth = ?,
                    notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(details.date_of_birth)
        .bind(&details.notes)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn archive(&self, id: i64, now: NaiveDateTime) -> Result<(), ServiceError> {
        sqlx::query("UPDATE clients SET archived_at = ?, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_active(&self) -> Result<i64, ServiceError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE archived_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
