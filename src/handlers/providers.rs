use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, ProviderForm, ServiceError, WeeklyHoursForm, WorkingHoursResponse};
use crate::services::ProviderService;

#[utoipa::path(
    post,
    path = "/api/providers",
    request_body = ProviderForm,
    responses(
        (status = 201, description = "Provider created"),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_provider(
    provider_service: web::Data<ProviderService>,
    form: web::Json<ProviderForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let provider = provider_service.create_provider(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "provider": provider
    })))
}

#[utoipa::path(
    get,
    path = "/api/providers",
    responses(
        (status = 200, description = "All providers"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_providers(
    provider_service: web::Data<ProviderService>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let providers = provider_service.list_providers().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "providers": providers
    })))
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    params(("id" = i64, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider found"),
        (status = 404, description = "Provider not found", body = ErrorResponse)
    )
)]
pub async fn get_provider(
    provider_service: web::Data<ProviderService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let provider = provider_service.get_provider(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "provider": provider
    })))
}

#[utoipa::path(
    put,
    path = "/api/providers/{id}",
    params(("id" = i64, Path, description = "Provider ID")),
    request_body = ProviderForm,
    responses(
        (status = 200, description = "Provider updated"),
        (status = 404, description = "Provider not found", body = ErrorResponse)
    )
)]
pub async fn update_provider(
    provider_service: web::Data<ProviderService>,
    path: web::Path<i64>,
    form: web::Json<ProviderForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let provider = provider_service.update_provider(path.into_inner(), &form).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "provider": provider
    })))
}

#[utoipa::path(
    delete,
    path = "/api/providers/{id}",
    params(("id" = i64, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider deleted", body = ApiResponse),
        (status = 404, description = "Provider not found", body = ErrorResponse),
        (status = 409, description = "Provider has appointments", body = ErrorResponse)
    )
)]
pub async fn delete_provider(
    provider_service: web::Data<ProviderService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let id = path.into_inner();
    provider_service.delete_provider(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: format!("Provider {} deleted", id),
    }))
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}/hours",
    params(("id" = i64, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Weekly working hours", body = WorkingHoursResponse),
        (status = 404, description = "Provider not found", body = ErrorResponse)
    )
)]
pub async fn get_working_hours(
    provider_service: web::Data<ProviderService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let provider_id = path.into_inner();
    let hours = provider_service.working_hours(provider_id).await?;
    Ok(HttpResponse::Ok().json(WorkingHoursResponse {
        success: true,
        provider_id,
        hours: WeeklyHoursForm::from_working_hours(&hours),
    }))
}

#[utoipa::path(
    put,
    path = "/api/providers/{id}/hours",
    params(("id" = i64, Path, description = "Provider ID")),
    request_body = WeeklyHoursForm,
    responses(
        (status = 200, description = "Working hours replaced", body = WorkingHoursResponse),
        (status = 400, description = "Malformed or inverted times", body = ErrorResponse),
        (status = 404, description = "Provider not found", body = ErrorResponse)
    )
)]
pub async fn set_working_hours(
    provider_service: web::Data<ProviderService>,
    path: web::Path<i64>,
    form: web::Json<WeeklyHoursForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let provider_id = path.into_inner();
    let hours = provider_service.set_working_hours(provider_id, &form).await?;
    Ok(HttpResponse::Ok().json(WorkingHoursResponse {
        success: true,
        provider_id,
        hours: WeeklyHoursForm::from_working_hours(&hours),
    }))
}
