pub mod appointment_service;
pub mod availability_service;
pub mod catalog_service;
pub mod client_service;
pub mod consent_service;
pub mod membership_service;
pub mod payment_service;
pub mod provider_service;
pub mod settings_service;
pub mod webhook_service;

pub use appointment_service::*;
pub use availability_service::*;
pub use catalog_service::*;
pub use client_service::*;
pub use consent_service::*;
pub use membership_service::*;
pub use payment_service::*;
pub use provider_service::*;
pub use settings_service::*;
pub use webhook_service::*;
