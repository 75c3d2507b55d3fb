use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// SQLite abort message raised by the appointment overlap triggers.
pub const APPOINTMENT_CONFLICT_MARKER: &str = "appointment_conflict";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Booking conflict")]
    BookingConflict,
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": msg
            })),
            ServiceError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "success": false,
                "message": msg
            })),
            ServiceError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "success": false,
                "message": msg
            })),
            ServiceError::BookingConflict => HttpResponse::Conflict().json(json!({
                "success": false,
                "bookable": false,
                "reason": "conflict",
                "message": "The requested time overlaps an existing appointment"
            })),
            ServiceError::AuthenticationError(msg) => HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": msg
            })),
            ServiceError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Database error occurred"
                }))
            }
            ServiceError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Internal server error"
                }))
            }
        }
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.message().contains(APPOINTMENT_CONFLICT_MARKER) {
                return ServiceError::BookingConflict;
            }
            if db_err.is_unique_violation() {
                return ServiceError::Conflict("A record with the same value already exists".to_string());
            }
        }
        ServiceError::DatabaseError(err.to_string())
    }
}

