use crate::models::{
    local_now, MessageEvent, MessagingWebhookPayload, Payment, PaymentWebhookPayload, ServiceError, SignatureCheck,
};
use crate::repositories::MessageEventRepository;
use crate::services::PaymentService;
use ring::hmac;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "X-Signature";
const SIGNATURE_PREFIX: &str = "sha256=";

/// HMAC-SHA256 check of `sha256=<hex>` signatures over the raw body
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn sign(secret: &str, body: &[u8]) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        let tag = hmac::sign(&key, body);
        format!("{}{}", SIGNATURE_PREFIX, hex::encode(tag.as_ref()))
    }

    pub fn verify(&self, signature_header: Option<&str>, body: &[u8]) -> SignatureCheck {
        let Some(secret) = &self.secret else {
            return SignatureCheck::NotConfigured;
        };
        let Some(header) = signature_header else {
            return SignatureCheck::Missing;
        };
        let Some(provided) = header.trim().strip_prefix(SIGNATURE_PREFIX) else {
            return SignatureCheck::Invalid;
        };

        let expected = Self::sign(secret, body);
        let expected = &expected[SIGNATURE_PREFIX.len()..];
        let provided = provided.to_ascii_lowercase();

        if subtle::ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into() {
            SignatureCheck::Valid
        } else {
            SignatureCheck::Invalid
        }
    }
}

pub struct WebhookService {
    payments: Arc<PaymentService>,
    messages: Arc<dyn MessageEventRepository>,
    payment_signatures: SignatureVerifier,
    messaging_signatures: SignatureVerifier,
}

impl WebhookService {
    pub fn new(
        payments: Arc<PaymentService>,
        messages: Arc<dyn MessageEventRepository>,
        payment_secret: Option<String>,
        messaging_secret: Option<String>,
    ) -> Self {
        Self {
            payments,
            messages,
            payment_signatures: SignatureVerifier::new(payment_secret),
            messaging_signatures: SignatureVerifier::new(messaging_secret),
        }
    }

    fn authenticate(
        verifier: &SignatureVerifier,
        source: &str,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<(), ServiceError> {
        match verifier.verify(signature, body) {
            SignatureCheck::Valid => Ok(()),
            SignatureCheck::NotConfigured => {
                tracing::warn!("Rejected {} webhook: no signing secret configured", source);
                Err(ServiceError::AuthenticationError("Webhook signing is not configured".to_string()))
            }
            SignatureCheck::Missing => {
                tracing::warn!("Rejected {} webhook: missing {} header", source, SIGNATURE_HEADER);
                Err(ServiceError::AuthenticationError("Missing webhook signature".to_string()))
            }
            SignatureCheck::Invalid => {
                tracing::warn!("Rejected {} webhook: invalid signature", source);
                Err(ServiceError::AuthenticationError("Invalid webhook signature".to_string()))
            }
        }
    }

    fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
        serde_json::from_slice(body)
            .map_err(|e| ServiceError::ValidationError(format!("Invalid webhook payload: {}", e)))
    }

    /// Returns `None` when the payment is unknown to us.
    pub async fn handle_payment(&self, signature: Option<&str>, body: &[u8]) -> Result<Option<Payment>, ServiceError> {
        Self::authenticate(&self.payment_signatures, "payment", signature, body)?;
        let payload: PaymentWebhookPayload = Self::parse(body)?;

        let updated = self
            .payments
            .apply_processor_status(&payload.external_id, payload.status)
            .await?;
        if updated.is_none() {
            tracing::warn!("Ignoring payment webhook for unknown id {}", payload.external_id);
        }
        Ok(updated)
    }

    pub async fn handle_message(&self, signature: Option<&str>, body: &[u8]) -> Result<MessageEvent, ServiceError> {
        Self::authenticate(&self.messaging_signatures, "messaging", signature, body)?;
        let payload: MessagingWebhookPayload = Self::parse(body)?;

        let message_id = payload.message_id.trim();
        let status = payload.status.trim();
        if message_id.is_empty() || status.is_empty() {
            return Err(ServiceError::ValidationError("message_id and status are required".to_string()));
        }

        let event = MessageEvent {
            message_id: message_id.to_string(),
            recipient: payload.to.filter(|to| !to.trim().is_empty()),
            status: status.to_string(),
            updated_at: local_now(),
        };
        self.messages.upsert(&event).await?;
        tracing::info!("Message {} is now {}", event.message_id, event.status);

        self.messages
            .find(&event.message_id)
            .await?
            .ok_or_else(|| ServiceError::InternalError(format!("Message event {} vanished", event.message_id)))
    }
}
