use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{
    AppointmentForm, AppointmentQuery, AppointmentStatusForm, AppointmentUpdateForm, BookingRejectedResponse,
    RejectionReason, ServiceError,
};
use crate::services::{AppointmentService, BookingOutcome};

fn rejected(reason: RejectionReason) -> HttpResponse {
    let message = match reason {
        RejectionReason::OutsideHours => "The requested time is outside the provider's working hours",
        RejectionReason::Conflict => "The requested time overlaps an existing appointment",
    };
    HttpResponse::Conflict().json(BookingRejectedResponse {
        success: false,
        bookable: false,
        reason,
        message: message.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = AppointmentForm,
    responses(
        (status = 201, description = "Appointment booked"),
        (status = 400, description = "Invalid range or inactive client/provider/service", body = ErrorResponse),
        (status = 404, description = "Client, provider or service not found", body = ErrorResponse),
        (status = 409, description = "Time not bookable", body = BookingRejectedResponse)
    )
)]
pub async fn create_appointment(
    appointment_service: web::Data<AppointmentService>,
    form: web::Json<AppointmentForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    match appointment_service.book(&form).await? {
        BookingOutcome::Booked(appointment) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "appointment": appointment
        }))),
        BookingOutcome::Rejected(reason) => Ok(rejected(reason)),
    }
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Appointments matching the filters"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_appointments(
    appointment_service: web::Data<AppointmentService>,
    query: web::Query<AppointmentQuery>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let appointments = appointment_service
        .list_appointments(query.date, query.provider_id, query.status)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment found"),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    )
)]
pub async fn get_appointment(
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let appointment = appointment_service.get_appointment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body = AppointmentUpdateForm,
    responses(
        (status = 200, description = "Appointment updated"),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 409, description = "New time not bookable, or appointment already closed", body = BookingRejectedResponse)
    )
)]
pub async fn update_appointment(
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<i64>,
    form: web::Json<AppointmentUpdateForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    match appointment_service.reschedule(path.into_inner(), &form).await? {
        BookingOutcome::Booked(appointment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "appointment": appointment
        }))),
        BookingOutcome::Rejected(reason) => Ok(rejected(reason)),
    }
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/status",
    params(("id" = i64, Path, description = "Appointment ID")),
    request_body = AppointmentStatusForm,
    responses(
        (status = 200, description = "Status changed"),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    )
)]
pub async fn change_appointment_status(
    appointment_service: web::Data<AppointmentService>,
    path: web::Path<i64>,
    form: web::Json<AppointmentStatusForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = authenticate_request(&req, &jwt_manager)?;

    let appointment = appointment_service
        .change_status(path.into_inner(), form.status)
        .await?;
    tracing::debug!("{} set appointment {} to {}", claims.sub, appointment.id, appointment.status.as_str());
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "appointment": appointment
    })))
}
