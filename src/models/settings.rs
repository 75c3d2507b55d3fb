use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a settings entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SettingsEntry {
    pub id: i64,
    pub key: String,
    pub value: String,
}

impl SettingsEntry {
    pub const ADMIN_PASSWORD_HASH: &'static str = "admin_password_hash";
    pub const ADMIN_USERNAME: &'static str = "admin_username";
}
