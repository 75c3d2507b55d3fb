use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_SERVICE_MINUTES: i64 = 5;
pub const MAX_SERVICE_MINUTES: i64 = 480;

/// Database entity representing a bookable treatment on the menu
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub price_cents: i64,
    pub is_active: bool,
}

impl Service {
    pub fn new(
        name: &str,
        category: &str,
        description: Option<String>,
        duration_minutes: i64,
        price_cents: i64,
        is_active: bool,
    ) -> Result<Self, String> {
        let name = name.trim();
        let category = category.trim();
        if name.is_empty() || category.is_empty() {
            return Err("Service name and category are required".to_string());
        }
        if !(MIN_SERVICE_MINUTES..=MAX_SERVICE_MINUTES).contains(&duration_minutes) {
            return Err(format!(
                "Duration must be between {} and {} minutes, got {}",
                MIN_SERVICE_MINUTES, MAX_SERVICE_MINUTES, duration_minutes
            ));
        }
        if price_cents < 0 {
            return Err("Price cannot be negative".to_string());
        }

        Ok(Self {
            id: 0, // Will be set by database on insert
            name: name.to_string(),
            category: category.to_string(),
            description,
            duration_minutes,
            price_cents,
            is_active,
        })
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.duration_minutes)
    }
}
