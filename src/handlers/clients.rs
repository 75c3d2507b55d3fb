use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, ClientForm, ClientSearchQuery, ServiceError};
use crate::services::ClientService;

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = ClientForm,
    responses(
        (status = 201, description = "Client created"),
        (status = 400, description = "Invalid name, email or phone", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_client(
    client_service: web::Data<ClientService>,
    form: web::Json<ClientForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let client = client_service.create_client(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "client": client
    })))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    params(ClientSearchQuery),
    responses(
        (status = 200, description = "Active clients, optionally filtered"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_clients(
    client_service: web::Data<ClientService>,
    query: web::Query<ClientSearchQuery>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let clients = client_service.list_clients(query.q.as_deref()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "clients": clients
    })))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn get_client(
    client_service: web::Data<ClientService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let client = client_service.get_client(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "client": client
    })))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    request_body = ClientForm,
    responses(
        (status = 200, description = "Client updated"),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_client(
    client_service: web::Data<ClientService>,
    path: web::Path<i64>,
    form: web::Json<ClientForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let client = client_service.update_client(path.into_inner(), &form).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "client": client
    })))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client archived", body = ApiResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn archive_client(
    client_service: web::Data<ClientService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = authenticate_request(&req, &jwt_manager)?;

    let id = path.into_inner();
    client_service.archive_client(id).await?;
    tracing::info!("Client {} archived by {}", id, claims.sub);
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: format!("Client {} archived", id),
    }))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/appointments",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Appointment history, newest first"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn client_appointments(
    client_service: web::Data<ClientService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let appointments = client_service.appointment_history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "appointments": appointments
    })))
}
