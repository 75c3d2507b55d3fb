use actix_web::{web, HttpRequest, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{local_now, HealthResponse, ServiceError, StatusData, StatusResponse};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    security()
)]
pub async fn health(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ServiceError> {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => Ok(HttpResponse::Ok().json(HealthResponse {
            success: true,
            database: "ok".to_string(),
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                success: false,
                database: "unavailable".to_string(),
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Record counts", body = StatusResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn get_status(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let clients = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE archived_at IS NULL")
        .fetch_one(pool.get_ref())
        .await?;

    let providers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM providers WHERE is_active = 1")
        .fetch_one(pool.get_ref())
        .await?;

    let upcoming_appointments = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM appointments WHERE start_at >= ? AND status IN ('scheduled', 'confirmed')",
    )
    .bind(local_now())
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        success: true,
        status: StatusData {
            clients,
            providers,
            upcoming_appointments,
        },
    }))
}
