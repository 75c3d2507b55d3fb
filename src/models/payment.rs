use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Terminal,
    GiftCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Database entity representing a point-of-sale payment
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub client_id: i64,
    pub appointment_id: Option<i64>,
    pub amount_cents: i64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Reference assigned by the payment processor
    pub external_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Business model for recording a payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub client_id: i64,
    pub appointment_id: Option<i64>,
    pub amount_cents: i64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub external_id: Option<String>,
}

impl NewPayment {
    pub fn new(
        client_id: i64,
        appointment_id: Option<i64>,
        amount_cents: i64,
        currency: Option<&str>,
        method: PaymentMethod,
        external_id: Option<String>,
    ) -> Result<Self, String> {
        if amount_cents <= 0 {
            return Err("Amount must be positive".to_string());
        }

        let currency = currency.unwrap_or("USD").trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid currency code: {}", currency));
        }

        // Cash is settled at the desk; everything else waits for the processor.
        let status = match method {
            PaymentMethod::Cash => PaymentStatus::Succeeded,
            _ => PaymentStatus::Pending,
        };

        Ok(Self {
            client_id,
            appointment_id,
            amount_cents,
            currency,
            method,
            status,
            external_id: external_id.filter(|id| !id.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_settles_immediately() {
        let cash = NewPayment::new(1, None, 5_000, None, PaymentMethod::Cash, None).unwrap();
        assert_eq!(cash.status, PaymentStatus::Succeeded);
        assert_eq!(cash.currency, "USD");

        let card = NewPayment::new(1, None, 5_000, Some("eur"), PaymentMethod::Card, Some("pi_1".into())).unwrap();
        assert_eq!(card.status, PaymentStatus::Pending);
        assert_eq!(card.currency, "EUR");
    }

    #[test]
    fn rejects_bad_amounts_and_currencies() {
        assert!(NewPayment::new(1, None, 0, None, PaymentMethod::Cash, None).is_err());
        assert!(NewPayment::new(1, None, 100, Some("dollars"), PaymentMethod::Cash, None).is_err());
        assert!(NewPayment::new(1, None, 100, Some("U$D"), PaymentMethod::Cash, None).is_err());
    }
}
