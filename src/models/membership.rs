use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a membership plan on offer
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct MembershipPlan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub is_active: bool,
}

impl MembershipPlan {
    pub fn new(
        name: &str,
        description: Option<String>,
        monthly_price_cents: i64,
        is_active: bool,
    ) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Plan name is required".to_string());
        }
        if monthly_price_cents < 0 {
            return Err("Monthly price cannot be negative".to_string());
        }
        Ok(Self {
            id: 0,
            name: name.to_string(),
            description,
            monthly_price_cents,
            is_active,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Cancelled,
}

/// A client's enrollment in a plan
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct ClientMembership {
    pub id: i64,
    pub client_id: i64,
    pub plan_id: i64,
    pub status: MembershipStatus,
    pub started_at: NaiveDateTime,
    pub cancelled_at: Option<NaiveDateTime>,
}
