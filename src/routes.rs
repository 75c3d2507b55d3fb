use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::handlers;

/// Malformed JSON bodies get the same `{success, message}` shape as other errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": message
            })),
        )
        .into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": message
            })),
        )
        .into()
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public
        .route("/api/login", web::post().to(handlers::login_api))
        .route("/api/logout", web::post().to(handlers::logout_api))
        .route("/api/site", web::get().to(handlers::site_info))
        .route("/api/catalog/services", web::get().to(handlers::public_catalog))
        .route("/api/availability/check", web::post().to(handlers::check_availability))
        .route("/api/availability/slots", web::get().to(handlers::list_free_slots))
        .route("/api/health", web::get().to(handlers::health))
        .route("/api/webhooks/payments", web::post().to(handlers::payment_webhook))
        .route("/api/webhooks/messaging", web::post().to(handlers::messaging_webhook))
        // Admin
        .route("/api/change-password", web::post().to(handlers::change_password_api))
        .route("/api/status", web::get().to(handlers::get_status))
        .route("/api/dashboard", web::get().to(handlers::dashboard_api))
        .route("/api/providers", web::post().to(handlers::create_provider))
        .route("/api/providers", web::get().to(handlers::list_providers))
        .route("/api/providers/{id}", web::get().to(handlers::get_provider))
        .route("/api/providers/{id}", web::put().to(handlers::update_provider))
        .route("/api/providers/{id}", web::delete().to(handlers::delete_provider))
        .route("/api/providers/{id}/hours", web::get().to(handlers::get_working_hours))
        .route("/api/providers/{id}/hours", web::put().to(handlers::set_working_hours))
        .route("/api/services", web::post().to(handlers::create_service))
        .route("/api/services", web::get().to(handlers::list_services))
        .route("/api/services/{id}", web::get().to(handlers::get_service))
        .route("/api/services/{id}", web::put().to(handlers::update_service))
        .route("/api/services/{id}", web::delete().to(handlers::delete_service))
        .route("/api/clients", web::post().to(handlers::create_client))
        .route("/api/clients", web::get().to(handlers::list_clients))
        .route("/api/clients/{id}", web::get().to(handlers::get_client))
        .route("/api/clients/{id}", web::put().to(handlers::update_client))
        .route("/api/clients/{id}", web::delete().to(handlers::archive_client))
        .route("/api/clients/{id}/appointments", web::get().to(handlers::client_appointments))
        .route("/api/clients/{id}/consents", web::get().to(handlers::client_consents))
        .route("/api/clients/{id}/memberships", web::get().to(handlers::client_memberships))
        .route("/api/appointments", web::post().to(handlers::create_appointment))
        .route("/api/appointments", web::get().to(handlers::list_appointments))
        .route("/api/appointments/{id}", web::get().to(handlers::get_appointment))
        .route("/api/appointments/{id}", web::patch().to(handlers::update_appointment))
        .route("/api/appointments/{id}/status", web::post().to(handlers::change_appointment_status))
        .route("/api/payments", web::post().to(handlers::create_payment))
        .route("/api/payments", web::get().to(handlers::list_payments))
        .route("/api/payments/{id}", web::get().to(handlers::get_payment))
        .route("/api/payments/{id}/refund", web::post().to(handlers::refund_payment))
        .route("/api/consents", web::post().to(handlers::create_consent))
        .route("/api/consents/{id}", web::get().to(handlers::get_consent))
        .route("/api/consents/{id}", web::delete().to(handlers::revoke_consent))
        .route("/api/memberships", web::post().to(handlers::enroll_client))
        .route("/api/memberships/plans", web::post().to(handlers::create_plan))
        .route("/api/memberships/plans", web::get().to(handlers::list_plans))
        .route("/api/memberships/plans/{id}", web::get().to(handlers::get_plan))
        .route("/api/memberships/plans/{id}", web::put().to(handlers::update_plan))
        .route("/api/memberships/plans/{id}", web::delete().to(handlers::delete_plan))
        .route("/api/memberships/{id}/cancel", web::post().to(handlers::cancel_membership));
}
