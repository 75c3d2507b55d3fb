use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::availability::{RejectionReason, Slot};
use crate::models::payment::{PaymentMethod, PaymentStatus};
use crate::models::provider::{weekday_name, TimeWindow, WorkingHours, TIME_FORMAT, WEEKDAYS};
use crate::models::service::Service;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// REQUEST TYPES
// =============================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ClientForm {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientSearchQuery {
    /// Matches first name, last name, email or phone
    pub q: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ProviderForm {
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Opening window for one day (format: "HH:MM")
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

/// Weekly working hours; a missing or null day is closed
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WeeklyHoursForm {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
}

impl WeeklyHoursForm {
    fn day(&self, day: Weekday) -> &Option<DayHours> {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn day_mut(&mut self, day: Weekday) -> &mut Option<DayHours> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    pub fn to_working_hours(&self) -> Result<WorkingHours, String> {
        let mut hours = WorkingHours::new();
        for day in WEEKDAYS {
            if let Some(window) = self.day(day) {
                let window = TimeWindow::parse(&window.open, &window.close)
                    .map_err(|e| format!("{}: {}", weekday_name(day), e))?;
                hours.set(day, Some(window));
            }
        }
        Ok(hours)
    }

    pub fn from_working_hours(hours: &WorkingHours) -> Self {
        let mut form = Self::default();
        for (day, window) in hours.iter() {
            *form.day_mut(day) = window.map(|w| DayHours {
                open: w.open.format(TIME_FORMAT).to_string(),
                close: w.close.format(TIME_FORMAT).to_string(),
            });
        }
        form
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ServiceForm {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub price_cents: i64,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct AvailabilityCheckForm {
    pub provider_id: i64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotQuery {
    pub provider_id: i64,
    pub date: NaiveDate,
    /// Slot length is taken from this service's duration
    pub service_id: Option<i64>,
    /// Explicit slot length, used when no service is given
    pub duration_minutes: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct AppointmentForm {
    pub client_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub start_at: NaiveDateTime,
    /// Defaults to start + service duration
    pub end_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AppointmentUpdateForm {
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AppointmentStatusForm {
    pub status: AppointmentStatus,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentQuery {
    pub date: Option<NaiveDate>,
    pub provider_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct PaymentForm {
    pub client_id: i64,
    pub appointment_id: Option<i64>,
    pub amount_cents: i64,
    pub currency: Option<String>,
    pub method: PaymentMethod,
    pub external_id: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentQuery {
    pub client_id: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct ConsentSubmission {
    pub client_id: i64,
    pub form_type: String,
    pub signed_name: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MembershipPlanForm {
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct EnrollmentForm {
    pub client_id: i64,
    pub plan_id: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct PaymentWebhookPayload {
    pub external_id: String,
    pub status: PaymentStatus,
}

#[derive(Deserialize, ToSchema)]
pub struct MessagingWebhookPayload {
    pub message_id: String,
    pub status: String,
    pub to: Option<String>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

// Common response types
#[derive(Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

// Authentication responses
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: u64, // seconds
}

// Availability responses
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub bookable: bool,
    pub reason: Option<RejectionReason>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingRejectedResponse {
    pub success: bool,
    pub bookable: bool,
    pub reason: RejectionReason,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct SlotsResponse {
    pub success: bool,
    pub provider_id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub slots: Vec<Slot>,
}

#[derive(Serialize, ToSchema)]
pub struct WorkingHoursResponse {
    pub success: bool,
    pub provider_id: i64,
    pub hours: WeeklyHoursForm,
}

// Catalog responses
#[derive(Serialize, ToSchema)]
pub struct ServiceCategory {
    pub category: String,
    pub services: Vec<Service>,
}

#[derive(Serialize, ToSchema)]
pub struct CatalogResponse {
    pub success: bool,
    pub categories: Vec<ServiceCategory>,
}

// Dashboard responses
#[derive(Serialize, ToSchema)]
pub struct ProviderAgenda {
    pub provider_id: i64,
    pub provider_name: String,
    pub appointments: Vec<Appointment>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    pub date: NaiveDate,
    pub providers: Vec<ProviderAgenda>,
    pub counts: BTreeMap<String, i64>,
}

// System status responses
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub database: String,
}

#[derive(Serialize, ToSchema)]
pub struct StatusData {
    pub clients: i64,
    pub providers: i64,
    pub upcoming_appointments: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    pub status: StatusData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_hours_round_trip_keeps_closed_days() {
        let form = WeeklyHoursForm {
            monday: Some(DayHours {
                open: "09:00".to_string(),
                close: "17:00".to_string(),
            }),
            saturday: Some(DayHours {
                open: "10:00".to_string(),
                close: "14:30".to_string(),
            }),
            ..Default::default()
        };

        let hours = form.to_working_hours().unwrap();
        assert!(hours.window_for(Weekday::Tue).is_none());

        let back = WeeklyHoursForm::from_working_hours(&hours);
        assert_eq!(back.saturday.unwrap().close, "14:30");
        assert!(back.sunday.is_none());
    }

    #[test]
    fn invalid_day_names_the_weekday() {
        let form = WeeklyHoursForm {
            wednesday: Some(DayHours {
                open: "18:00".to_string(),
                close: "08:00".to_string(),
            }),
            ..Default::default()
        };
        let err = form.to_working_hours().unwrap_err();
        assert!(err.starts_with("Wednesday"));
    }
}
