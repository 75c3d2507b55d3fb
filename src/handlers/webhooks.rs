use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::models::ServiceError;
use crate::services::{WebhookService, SIGNATURE_HEADER};

fn signature(req: &HttpRequest) -> Option<&str> {
    req.headers().get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok())
}

#[utoipa::path(
    post,
    path = "/api/webhooks/payments",
    request_body = PaymentWebhookPayload,
    params(("X-Signature" = String, Header, description = "sha256=<hex HMAC of the raw body>")),
    responses(
        (status = 200, description = "Status applied, or ignored for an unknown payment"),
        (status = 400, description = "Malformed payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorResponse)
    ),
    security()
)]
pub async fn payment_webhook(
    webhook_service: web::Data<WebhookService>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let payment = webhook_service.handle_payment(signature(&req), &body).await?;

    Ok(HttpResponse::Ok().json(match payment {
        Some(payment) => json!({
            "success": true,
            "ignored": false,
            "payment": payment
        }),
        None => json!({
            "success": true,
            "ignored": true
        }),
    }))
}

#[utoipa::path(
    post,
    path = "/api/webhooks/messaging",
    request_body = MessagingWebhookPayload,
    params(("X-Signature" = String, Header, description = "sha256=<hex HMAC of the raw body>")),
    responses(
        (status = 200, description = "Delivery status stored"),
        (status = 400, description = "Malformed payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorResponse)
    ),
    security()
)]
pub async fn messaging_webhook(
    webhook_service: web::Data<WebhookService>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let event = webhook_service.handle_message(signature(&req), &body).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "event": event
    })))
}
