//! Booking-conflict check and free-slot computation.
//!
//! Everything here is pure: callers load the provider's working hours and the
//! appointments of the day, and get back a decision. A rejected booking is a
//! normal result, never an error.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::appointment::Appointment;
use crate::models::provider::WorkingHours;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    OutsideHours,
    Conflict,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::OutsideHours => "outside_hours",
            RejectionReason::Conflict => "conflict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AvailabilityDecision {
    pub bookable: bool,
    pub reason: Option<RejectionReason>,
}

impl AvailabilityDecision {
    pub fn bookable() -> Self {
        Self {
            bookable: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            bookable: false,
            reason: Some(reason),
        }
    }
}

/// Decide whether `[start, end)` can be booked.
///
/// Working hours are checked first, so a range outside hours reports
/// `OutsideHours` even if it also collides with an appointment. Appointments
/// whose status no longer blocks time are ignored, as is `exclude_id` (the
/// appointment being rescheduled).
pub fn evaluate(
    start: NaiveDateTime,
    end: NaiveDateTime,
    hours: &WorkingHours,
    existing: &[Appointment],
    exclude_id: Option<i64>,
) -> AvailabilityDecision {
    if !hours.contains(start, end) {
        return AvailabilityDecision::rejected(RejectionReason::OutsideHours);
    }

    let conflict = existing
        .iter()
        .filter(|appt| Some(appt.id) != exclude_id)
        .filter(|appt| appt.status.blocks_time())
        .any(|appt| appt.overlaps(start, end));

    if conflict {
        AvailabilityDecision::rejected(RejectionReason::Conflict)
    } else {
        AvailabilityDecision::bookable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Slot {
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

/// Free slots of length `duration` on `date`, with candidate starts every
/// `step` from the opening time.
pub fn free_slots(
    date: NaiveDate,
    duration: Duration,
    step: Duration,
    hours: &WorkingHours,
    existing: &[Appointment],
) -> Vec<Slot> {
    let mut slots = Vec::new();
    if duration <= Duration::zero() || step <= Duration::zero() {
        return slots;
    }

    let Some(window) = hours.window_for(date.weekday()) else {
        return slots;
    };

    let close = date.and_time(window.close);
    let mut start = date.and_time(window.open);
    while let Some(end) = start.checked_add_signed(duration).filter(|end| *end <= close) {
        if evaluate(start, end, hours, existing, None).bookable {
            slots.push(Slot {
                start_at: start,
                end_at: end,
            });
        }
        match start.checked_add_signed(step) {
            Some(next) => start = next,
            None => break,
        }
    }
    slots
}
