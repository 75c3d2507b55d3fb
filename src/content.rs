//! Public site metadata served to the marketing front end.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::AppConfig;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Location {
    pub slug: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SiteInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// IANA zone that appointment times are expressed in
    pub timezone: String,
    pub locations: Vec<Location>,
}

impl SiteInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        let site = &config.site;
        Self {
            name: site.name.clone(),
            phone: site.phone.clone(),
            email: site.email.clone(),
            timezone: site.timezone.clone(),
            locations: vec![Location {
                slug: slugify(&site.name),
                name: site.name.clone(),
                address: site.address.clone(),
                phone: site.phone.clone(),
            }],
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SiteResponse {
    pub success: bool,
    pub site: SiteInfo,
}

fn slugify(value: &str) -> String {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
