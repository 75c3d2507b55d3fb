use crate::models::{NewPayment, Payment, PaymentStatus, ServiceError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

const PAYMENT_COLUMNS: &str = "id, client_id, appointment_id, amount_cents, currency, method, status, external_id, \
                               created_at, updated_at";

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, ServiceError>;
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Payment>, ServiceError>;
    async fn find_all(&self, client_id: Option<i64>) -> Result<Vec<Payment>, ServiceError>;
    async fn insert(&self, payment: &NewPayment, now: NaiveDateTime) -> Result<i64, ServiceError>;
    async fn update_status(&self, id: i64, status: PaymentStatus, now: NaiveDateTime) -> Result<(), ServiceError>;
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, ServiceError> {
        let sql = format!("SELECT {} FROM payments WHERE id = ?", PAYMENT_COLUMNS);
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Payment>, ServiceError> {
        let sql = format!("SELECT {} FROM payments WHERE external_id = ?", PAYMENT_COLUMNS);
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    async fn find_all(&self, client_id: Option<i64>) -> Result<Vec<Payment>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE (?1 IS NULL OR client_id = ?1) ORDER BY created_at DESC, id DESC",
            PAYMENT_COLUMNS
        );
        let payments = sqlx::query_as::<_, Payment>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    async fn insert(&self, payment: &NewPayment, now: NaiveDateTime) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO payments (client_id, appointment_id, amount_cents, currency, method, status, external_id,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(payment.client_id)
        .bind(payment.appointment_id)
        .bind(payment.amount_cents)
        .bind(&payment.currency)
        .bind(payment.method)
        .bind(payment.status)
        .bind(&payment.external_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_status(&self, id: i64, status: PaymentStatus, now: NaiveDateTime) -> Result<(), ServiceError> {
        sqlx::query("UPDATE payments SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
