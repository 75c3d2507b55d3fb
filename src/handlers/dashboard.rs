use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{local_now, DashboardQuery, DashboardResponse, ServiceError};
use crate::services::AppointmentService;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Daily agenda per provider", body = DashboardResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn dashboard_api(
    appointment_service: web::Data<AppointmentService>,
    query: web::Query<DashboardQuery>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let date = query.date.unwrap_or_else(|| local_now().date());
    let (providers, counts) = appointment_service.agenda(date).await?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        success: true,
        date,
        providers,
        counts,
    }))
}
