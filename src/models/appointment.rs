use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// Whether an appointment in this state still holds its time slot.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database entity representing a booked time range
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: i64,
    pub client_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Appointment {
    /// Half-open interval overlap against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_at < end && start < self.end_at
    }
}

/// Business model for a new booking before it is persisted
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn new(
        client_id: i64,
        provider_id: i64,
        service_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Result<Self, String> {
        let (start_at, end_at) = normalize_range(start_at, end_at)?;
        Ok(Self {
            client_id,
            provider_id,
            service_id,
            start_at,
            end_at,
            notes,
        })
    }
}

/// Drops seconds and validates that the range is non-empty.
pub fn normalize_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let start = truncate_to_minute(start);
    let end = truncate_to_minute(end);
    if start >= end {
        return Err("Appointment end must be after its start".to_string());
    }
    Ok((start, end))
}

pub const DATE_OUT_OF_RANGE: &str = "Date out of range";

/// `at + by`, or an error when the result leaves chrono's calendar.
pub fn shift(at: NaiveDateTime, by: Duration) -> Result<NaiveDateTime, String> {
    at.checked_add_signed(by).ok_or_else(|| DATE_OUT_OF_RANGE.to_string())
}

/// Half-open `[midnight, next midnight)` covering `date`.
pub fn day_bounds(date: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let start = date.and_time(NaiveTime::MIN);
    Ok((start, shift(start, Duration::days(1))?))
}

/// Current wall-clock time of the business, to the minute.
pub fn local_now() -> NaiveDateTime {
    truncate_to_minute(Local::now().naive_local())
}

pub fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn status_transitions() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!NoShow.can_transition_to(Confirmed));
    }

    #[test]
    fn cancelled_and_no_show_release_the_slot() {
        assert!(AppointmentStatus::Scheduled.blocks_time());
        assert!(AppointmentStatus::Completed.blocks_time());
        assert!(!AppointmentStatus::Cancelled.blocks_time());
        assert!(!AppointmentStatus::NoShow.blocks_time());
    }

    #[test]
    fn day_bounds_at_the_end_of_the_calendar() {
        let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()).unwrap();
        assert_eq!(start, at(0, 0, 0));
        assert_eq!(end - start, Duration::days(1));

        assert_eq!(day_bounds(NaiveDate::MAX).unwrap_err(), DATE_OUT_OF_RANGE);
        assert!(shift(NaiveDateTime::MAX, Duration::minutes(30)).is_err());
    }

    #[test]
    fn normalize_drops_seconds_and_rejects_empty_ranges() {
        let (start, end) = normalize_range(at(10, 0, 42), at(10, 30, 5)).unwrap();
        assert_eq!(start, at(10, 0, 0));
        assert_eq!(end, at(10, 30, 0));
        assert!(normalize_range(at(10, 30, 0), at(10, 30, 59)).is_err());
        assert!(normalize_range(at(11, 0, 0), at(10, 0, 0)).is_err());
    }
}
