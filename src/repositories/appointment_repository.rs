use crate::models::{Appointment, AppointmentStatus, NewAppointment, ServiceError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

const APPOINTMENT_COLUMNS: &str = "id, client_id, provider_id, service_id, start_at, end_at, status, notes, \
                                   created_at, updated_at";

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, ServiceError>;
    /// Appointments of one provider that intersect `[from, to)`, any status.
    async fn find_for_provider(
        &self,
        provider_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Appointment>, ServiceError>;
    async fn find_between(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        provider_id: Option<i64>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, ServiceError>;
    async fn find_for_client(&self, client_id: i64) -> Result<Vec<Appointment>, ServiceError>;
    async fn insert(&self, appointment: &NewAppointment, now: NaiveDateTime) -> Result<i64, ServiceError>;
    async fn update_schedule(
        &self,
        id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        notes: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<(), ServiceError>;
    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
        now: NaiveDateTime,
    ) -> Result<(), ServiceError>;
    async fn count_upcoming(&self, now: NaiveDateTime) -> Result<i64, ServiceError>;
}

pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, ServiceError> {
        let sql = format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS);
        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appointment)
    }

    async fn find_for_provider(
        &self,
        provider_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM appointments
             WHERE provider_id = ? AND start_at < ? AND end_at > ?
             ORDER BY start_at",
            APPOINTMENT_COLUMNS
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(provider_id)
            .bind(to)
            .bind(from)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    async fn find_between(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        provider_id: Option<i64>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM appointments
             WHERE (?1 IS NULL OR start_at >= ?1)
               AND (?2 IS NULL OR start_at < ?2)
               AND (?3 IS NULL OR provider_id = ?3)
               AND (?4 IS NULL OR status = ?4)
             ORDER BY start_at, provider_id",
            APPOINTMENT_COLUMNS
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(from)
            .bind(to)
            .bind(provider_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    async fn find_for_client(&self, client_id: i64) -> Result<Vec<Appointment>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM appointments WHERE client_id = ? ORDER BY start_at DESC",
            APPOINTMENT_COLUMNS
        );
        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    async fn insert(&self, appointment: &NewAppointment, now: NaiveDateTime) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO appointments (client_id, provider_id, service_id, start_at, end_at, status, notes,
                                       created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(appointment.client_id)
        .bind(appointment.provider_id)
        .bind(appointment.service_id)
        .bind(appointment.start_at)
        .bind(appointment.end_at)
        .bind(AppointmentStatus::Scheduled)
        .bind(&appointment.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_schedule(
        &self,
        id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        notes: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<(), ServiceError> {
        sqlx::query("UPDATE appointments SET start_at = ?, end_at = ?, notes = ?, updated_at = ? WHERE id = ?")
            .bind(start_at)
            .bind(end_at)
            .bind(notes)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
        now: NaiveDateTime,
    ) -> Result<(), ServiceError> {
        sqlx::query("UPDATE appointments SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_upcoming(&self, now: NaiveDateTime) -> Result<i64, ServiceError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments
             WHERE start_at >= ? AND status IN ('scheduled', 'confirmed')",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
