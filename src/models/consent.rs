use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a signed consent form
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct ConsentForm {
    pub id: i64,
    pub client_id: i64,
    pub form_type: String,
    pub signed_name: String,
    pub content: String,
    pub signed_at: NaiveDateTime,
}
