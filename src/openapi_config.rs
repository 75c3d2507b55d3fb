use std::collections::BTreeMap;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::OpenApi;

use crate::content::{Location, SiteInfo, SiteResponse};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Med Spa Backend API",
        description = "Booking, client records, point-of-sale and memberships for a med spa"
    ),
    paths(
        handlers::auth::login_api,
        handlers::auth::logout_api,
        handlers::auth::change_password_api,
        handlers::site::site_info,
        handlers::site::public_catalog,
        handlers::availability::check_availability,
        handlers::availability::list_free_slots,
        handlers::providers::create_provider,
        handlers::providers::list_providers,
        handlers::providers::get_provider,
        handlers::providers::update_provider,
        handlers::providers::delete_provider,
        handlers::providers::get_working_hours,
        handlers::providers::set_working_hours,
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::get_service,
        handlers::catalog::update_service,
        handlers::catalog::delete_service,
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::archive_client,
        handlers::clients::client_appointments,
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::change_appointment_status,
        handlers::dashboard::dashboard_api,
        handlers::payments::create_payment,
        handlers::payments::list_payments,
        handlers::payments::get_payment,
        handlers::payments::refund_payment,
        handlers::consents::create_consent,
        handlers::consents::client_consents,
        handlers::consents::get_consent,
        handlers::consents::revoke_consent,
        handlers::memberships::create_plan,
        handlers::memberships::list_plans,
        handlers::memberships::get_plan,
        handlers::memberships::update_plan,
        handlers::memberships::delete_plan,
        handlers::memberships::enroll_client,
        handlers::memberships::client_memberships,
        handlers::memberships::cancel_membership,
        handlers::webhooks::payment_webhook,
        handlers::webhooks::messaging_webhook,
        handlers::system::health,
        handlers::system::get_status,
    ),
    components(schemas(
        LoginForm, PasswordChangeForm, LoginResponse, ApiResponse, ErrorResponse,
        SiteInfo, Location, SiteResponse, Service, ServiceForm, ServiceCategory, CatalogResponse,
        Provider, ProviderForm, DayHours, WeeklyHoursForm, WorkingHoursResponse,
        Client, ClientForm,
        AvailabilityCheckForm, AvailabilityResponse, RejectionReason, Slot, SlotsResponse,
        Appointment, AppointmentStatus, AppointmentForm, AppointmentUpdateForm, AppointmentStatusForm,
        BookingRejectedResponse, ProviderAgenda, DashboardResponse,
        Payment, PaymentMethod, PaymentStatus, PaymentForm,
        ConsentForm, ConsentSubmission,
        MembershipPlan, MembershipPlanForm, MembershipStatus, ClientMembership, EnrollmentForm,
        PaymentWebhookPayload, MessagingWebhookPayload, MessageEvent,
        HealthResponse, StatusData, StatusResponse,
    )),
    tags(
        (name = "medspa", description = "Med spa management endpoints")
    )
)]
pub struct ApiDoc;

pub fn configure_openapi(mut openapi: OpenApiSpec) -> OpenApiSpec {
    // HTTP Bearer scheme, not ApiKey
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        "bearer_auth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("JWT token authorization"))
                .build(),
        ),
    );

    if let Some(components) = openapi.components.as_mut() {
        components.security_schemes = security_schemes;
    }

    // Applies to every endpoint without a security() override
    openapi.security = Some(vec![SecurityRequirement::new("bearer_auth", Vec::<String>::new())]);

    openapi
}

pub fn api_doc() -> OpenApiSpec {
    configure_openapi(ApiDoc::openapi())
}
