use actix_web::{web, HttpResponse, Result};

use crate::models::{AvailabilityCheckForm, AvailabilityResponse, ServiceError, SlotQuery, SlotsResponse};
use crate::services::AvailabilityService;

#[utoipa::path(
    post,
    path = "/api/availability/check",
    request_body = AvailabilityCheckForm,
    responses(
        (status = 200, description = "Decision; a rejection carries a reason code", body = AvailabilityResponse),
        (status = 400, description = "End is not after start", body = ErrorResponse),
        (status = 404, description = "Provider not found", body = ErrorResponse)
    ),
    security()
)]
pub async fn check_availability(
    availability_service: web::Data<AvailabilityService>,
    form: web::Json<AvailabilityCheckForm>,
) -> Result<HttpResponse, ServiceError> {
    let decision = availability_service
        .check(form.provider_id, form.start_at, form.end_at, None)
        .await?;

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        success: true,
        bookable: decision.bookable,
        reason: decision.reason,
    }))
}

#[utoipa::path(
    get,
    path = "/api/availability/slots",
    params(SlotQuery),
    responses(
        (status = 200, description = "Free slots for the day", body = SlotsResponse),
        (status = 400, description = "No usable slot length", body = ErrorResponse),
        (status = 404, description = "Provider or service not found", body = ErrorResponse)
    ),
    security()
)]
pub async fn list_free_slots(
    availability_service: web::Data<AvailabilityService>,
    query: web::Query<SlotQuery>,
) -> Result<HttpResponse, ServiceError> {
    let (duration_minutes, slots) = availability_service
        .slots(query.provider_id, query.date, query.service_id, query.duration_minutes)
        .await?;

    Ok(HttpResponse::Ok().json(SlotsResponse {
        success: true,
        provider_id: query.provider_id,
        date: query.date,
        duration_minutes,
        slots,
    }))
}
