use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a spa client
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub archived_at: Option<NaiveDateTime>,
}

impl Client {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated client fields shared by create and update
#[derive(Debug, Clone)]
pub struct ClientDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ClientDetails {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        date_of_birth: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Self, String> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err("First and last name are required".to_string());
        }

        let email = non_empty(email).map(|e| e.to_lowercase());
        if let Some(email) = &email {
            if !is_plausible_email(email) {
                return Err(format!("Invalid email address: {}", email));
            }
        }

        let phone = non_empty(phone);
        if let Some(phone) = &phone {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            let allowed = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
            if !allowed || !(7..=15).contains(&digits) {
                return Err(format!("Invalid phone number: {}", phone));
            }
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            phone,
            date_of_birth,
            notes,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        let details = ClientDetails::new(" Ada ", "Lovelace", Some(" Ada@Example.COM "), Some(""), None, None)
            .unwrap();
        assert_eq!(details.first_name, "Ada");
        assert_eq!(details.email.as_deref(), Some("ada@example.com"));
        assert_eq!(details.phone, None);
    }

    #[test]
    fn rejects_bad_contact_details() {
        assert!(ClientDetails::new("", "X", None, None, None, None).is_err());
        assert!(ClientDetails::new("A", "B", Some("not-an-email"), None, None, None).is_err());
        assert!(ClientDetails::new("A", "B", Some("a@b"), None, None, None).is_err());
        assert!(ClientDetails::new("A", "B", None, Some("12"), None, None).is_err());
        assert!(ClientDetails::new("A", "B", None, Some("call me"), None, None).is_err());
        assert!(ClientDetails::new("A", "B", None, Some("+1 (555) 010-2030"), None, None).is_ok());
    }
}
