use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, ServiceError, ServiceForm};
use crate::services::CatalogService;

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = ServiceForm,
    responses(
        (status = 201, description = "Service created"),
        (status = 400, description = "Invalid duration, price or name", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_service(
    catalog_service: web::Data<CatalogService>,
    form: web::Json<ServiceForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let service = catalog_service.create_service(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "service": service
    })))
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "All services, including inactive ones"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_services(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let services = catalog_service.list_services().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "services": services
    })))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service found"),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
pub async fn get_service(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let service = catalog_service.get_service(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "service": service
    })))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service ID")),
    request_body = ServiceForm,
    responses(
        (status = 200, description = "Service updated"),
        (status = 400, description = "Invalid duration, price or name", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
pub async fn update_service(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
    form: web::Json<ServiceForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let service = catalog_service.update_service(path.into_inner(), &form).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "service": service
    })))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted", body = ApiResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Service has appointments", body = ErrorResponse)
    )
)]
pub async fn delete_service(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let id = path.into_inner();
    catalog_service.delete_service(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: format!("Service {} deleted", id),
    }))
}
