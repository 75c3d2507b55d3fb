pub mod appointment_repository;
pub mod client_repository;
pub mod consent_repository;
pub mod membership_repository;
pub mod message_event_repository;
pub mod payment_repository;
pub mod provider_repository;
pub mod service_repository;
pub mod settings_repository;

pub use appointment_repository::*;
pub use client_repository::*;
pub use consent_repository::*;
pub use membership_repository::*;
pub use message_event_repository::*;
pub use payment_repository::*;
pub use provider_repository::*;
pub use service_repository::*;
pub use settings_repository::*;
