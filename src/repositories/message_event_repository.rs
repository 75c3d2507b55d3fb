use crate::models::{MessageEvent, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait MessageEventRepository: Send + Sync {
    async fn upsert(&self, event: &MessageEvent) -> Result<(), ServiceError>;
    async fn find(&self, message_id: &str) -> Result<Option<MessageEvent>, ServiceError>;
}

pub struct SqliteMessageEventRepository {
    pool: SqlitePool,
}

impl SqliteMessageEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageEventRepository for SqliteMessageEventRepository {
    async fn upsert(&self, event: &MessageEvent) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO message_events (message_id, recipient, status, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(message_id) DO UPDATE SET
                 status = excluded.status,
                 recipient = COALESCE(excluded.recipient, message_events.recipient),
                 updated_at = excluded.updated_at",
        )
        .bind(&event.message_id)
        .bind(&event.recipient)
        .bind(&event.status)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, message_id: &str) -> Result<Option<MessageEvent>, ServiceError> {
        let event = sqlx::query_as::<_, MessageEvent>(
            "SELECT message_id, recipient, status, updated_at FROM message_events WHERE message_id = ?",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }
}
