use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{PaymentForm, PaymentQuery, ServiceError};
use crate::services::PaymentService;

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentForm,
    responses(
        (status = 201, description = "Payment recorded; cash settles immediately, other methods stay pending"),
        (status = 400, description = "Invalid amount or currency", body = ErrorResponse),
        (status = 404, description = "Client or appointment not found", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    payment_service: web::Data<PaymentService>,
    form: web::Json<PaymentForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let payment = payment_service.record_payment(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "payment": payment
    })))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentQuery),
    responses(
        (status = 200, description = "Payments, newest first"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_payments(
    payment_service: web::Data<PaymentService>,
    query: web::Query<PaymentQuery>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let payments = payment_service.list_payments(query.client_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "payments": payments
    })))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found"),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
pub async fn get_payment(
    payment_service: web::Data<PaymentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let payment = payment_service.get_payment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "payment": payment
    })))
}

#[utoipa::path(
    post,
    path = "/api/payments/{id}/refund",
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment refunded"),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 409, description = "Payment has not succeeded", body = ErrorResponse)
    )
)]
pub async fn refund_payment(
    payment_service: web::Data<PaymentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = authenticate_request(&req, &jwt_manager)?;

    let payment = payment_service.refund(path.into_inner()).await?;
    tracing::info!("Payment {} refunded by {}", payment.id, claims.sub);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "payment": payment
    })))
}
