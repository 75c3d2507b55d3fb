use anyhow::{bail, Context};
use std::net::SocketAddr;

pub const DEFAULT_SLOT_STEP_MINUTES: i64 = 15;

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub payment_webhook_secret: Option<String>,
    pub messaging_webhook_secret: Option<String>,
    pub slot_step_minutes: i64,
    pub site: SiteSettings,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("PORT", "5000")
            .parse::<u16>()
            .context("PORT must be a number between 0 and 65535")?;

        let bind_address = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        let database_url = env_or("DATABASE_URL", "sqlite:medspa.db");

        let jwt_secret = env_opt("JWT_SECRET").unwrap_or_else(|| {
            use rand::Rng;
            let mut rng = rand::thread_rng();
            let bytes: [u8; 32] = rng.gen();
            use base64::Engine;
            tracing::warn!("JWT_SECRET not set; tokens will not survive a restart");
            base64::engine::general_purpose::STANDARD.encode(bytes)
        });

        let slot_step_minutes = match env_opt("SLOT_STEP_MINUTES") {
            Some(value) => value
                .parse::<i64>()
                .context("SLOT_STEP_MINUTES must be a whole number of minutes")?,
            None => DEFAULT_SLOT_STEP_MINUTES,
        };
        if slot_step_minutes <= 0 {
            bail!("SLOT_STEP_MINUTES must be positive, got {}", slot_step_minutes);
        }

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin"),
            payment_webhook_secret: env_opt("PAYMENT_WEBHOOK_SECRET"),
            messaging_webhook_secret: env_opt("MESSAGING_WEBHOOK_SECRET"),
            slot_step_minutes,
            site: SiteSettings {
                name: env_or("SITE_NAME", "Lumen Med Spa"),
                phone: env_or("SITE_PHONE", "(555) 010-2030"),
                email: env_or("SITE_EMAIL", "hello@lumenmedspa.example"),
                address: env_or("SITE_ADDRESS", "120 Harbor Street, Suite 4"),
                timezone: env_or("SITE_TIMEZONE", "America/New_York"),
            },
        })
    }
}
