use crate::models::{ServiceError, SettingsEntry};
use crate::repositories::SettingsRepository;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Admin credentials kept in the `settings` table
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_admin_username(&self) -> Result<Option<String>, ServiceError> {
        Ok(self
            .repository
            .find_by_key(SettingsEntry::ADMIN_USERNAME)
            .await?
            .map(|entry| entry.value))
    }

    pub async fn get_admin_password_hash(&self) -> Result<Option<String>, ServiceError> {
        Ok(self
            .repository
            .find_by_key(SettingsEntry::ADMIN_PASSWORD_HASH)
            .await?
            .map(|entry| entry.value))
    }

    /// Store the admin account unless one already exists. Returns true when seeded.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        if self.get_admin_password_hash().await?.is_some() {
            return Ok(false);
        }

        let hash = hash_password(password)?;
        self.repository
            .upsert(SettingsEntry::ADMIN_USERNAME, username)
            .await?;
        self.repository
            .upsert(SettingsEntry::ADMIN_PASSWORD_HASH, &hash)
            .await?;

        tracing::info!("Seeded admin account '{}'", username);
        Ok(true)
    }

    pub async fn verify_admin(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        let expected_username = self
            .get_admin_username()
            .await?
            .unwrap_or_else(|| "admin".to_string());
        if username != expected_username {
            return Ok(false);
        }

        match self.get_admin_password_hash().await? {
            Some(hash) => Ok(verify_password(password, &hash)),
            None => Ok(false),
        }
    }

    pub async fn change_admin_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ServiceError> {
        if current_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            return Err(ServiceError::ValidationError("All fields are required".to_string()));
        }
        if new_password != confirm_password {
            return Err(ServiceError::ValidationError("New passwords do not match".to_string()));
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::ValidationError(format!(
                "New password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = self
            .get_admin_password_hash()
            .await?
            .ok_or_else(|| ServiceError::InternalError("Admin password is not initialised".to_string()))?;
        if !verify_password(current_password, &hash) {
            return Err(ServiceError::AuthenticationError(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = hash_password(new_password)?;
        self.repository
            .upsert(SettingsEntry::ADMIN_PASSWORD_HASH, &new_hash)
            .await?;

        tracing::info!("Admin password updated");
        Ok(())
    }
}
