use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a staff member who delivers services
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Provider {
    pub fn new(
        name: &str,
        title: Option<String>,
        email: Option<String>,
        is_active: bool,
        created_at: NaiveDateTime,
    ) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Provider name is required".to_string());
        }
        Ok(Self {
            id: 0, // Will be set by database on insert
            name: name.to_string(),
            title,
            email,
            is_active,
            created_at,
        })
    }
}

pub const TIME_FORMAT: &str = "%H:%M";

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Opening window for a single weekday. `open` is inclusive, `close` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl TimeWindow {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, String> {
        if open >= close {
            return Err(format!(
                "Opening time {} must be before closing time {}",
                open.format(TIME_FORMAT),
                close.format(TIME_FORMAT)
            ));
        }
        Ok(Self { open, close })
    }

    /// Parse a window from "HH:MM" strings.
    pub fn parse(open: &str, close: &str) -> Result<Self, String> {
        let open = parse_time(open)?;
        let close = parse_time(close)?;
        Self::new(open, close)
    }
}

pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| format!("Invalid time '{}', expected HH:MM", value))
}

/// Per-weekday working hours of a provider. A day without a window is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingHours {
    days: [Option<TimeWindow>; 7],
}

impl WorkingHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.set(day, Some(window));
        self
    }

    pub fn set(&mut self, day: Weekday, window: Option<TimeWindow>) {
        self.days[day.num_days_from_monday() as usize] = window;
    }

    pub fn window_for(&self, day: Weekday) -> Option<TimeWindow> {
        self.days[day.num_days_from_monday() as usize]
    }

    pub fn is_closed_all_week(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    /// True when `[start, end)` lies entirely inside the window of `start`'s weekday.
    /// Ranges crossing midnight are never contained.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if start >= end || start.date() != end.date() {
            return false;
        }
        match self.window_for(start.date().weekday()) {
            Some(window) => window.open <= start.time() && end.time() <= window.close,
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<TimeWindow>)> + '_ {
        WEEKDAYS.iter().map(move |day| (*day, self.window_for(*day)))
    }
}

/// Row shape of `provider_working_hours`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkingHoursRow {
    pub provider_id: i64,
    pub weekday: i64,
    pub open_time: String,
    pub close_time: String,
}

impl WorkingHoursRow {
    pub fn weekday(&self) -> Option<Weekday> {
        WEEKDAYS.get(usize::try_from(self.weekday).ok()?).copied()
    }
}
