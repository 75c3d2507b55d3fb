use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, ConsentSubmission, ServiceError};
use crate::services::ConsentService;

#[utoipa::path(
    post,
    path = "/api/consents",
    request_body = ConsentSubmission,
    responses(
        (status = 201, description = "Consent recorded"),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn create_consent(
    consent_service: web::Data<ConsentService>,
    form: web::Json<ConsentSubmission>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let consent = consent_service.record_consent(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "consent": consent
    })))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/consents",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Signed forms of the client"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn client_consents(
    consent_service: web::Data<ConsentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let consents = consent_service.consents_for_client(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "consents": consents
    })))
}

#[utoipa::path(
    get,
    path = "/api/consents/{id}",
    params(("id" = i64, Path, description = "Consent form ID")),
    responses(
        (status = 200, description = "Consent form found"),
        (status = 404, description = "Consent form not found", body = ErrorResponse)
    )
)]
pub async fn get_consent(
    consent_service: web::Data<ConsentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let consent = consent_service.get_consent(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "consent": consent
    })))
}

#[utoipa::path(
    delete,
    path = "/api/consents/{id}",
    params(("id" = i64, Path, description = "Consent form ID")),
    responses(
        (status = 200, description = "Consent revoked", body = ApiResponse),
        (status = 404, description = "Consent form not found", body = ErrorResponse)
    )
)]
pub async fn revoke_consent(
    consent_service: web::Data<ConsentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let id = path.into_inner();
    consent_service.revoke_consent(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: format!("Consent form {} revoked", id),
    }))
}
