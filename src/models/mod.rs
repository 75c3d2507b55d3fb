// Re-export all models organized by domain
pub mod api;
pub mod appointment;
pub mod availability;
pub mod client;
pub mod consent;
pub mod errors;
pub mod membership;
pub mod payment;
pub mod provider;
pub mod service;
pub mod settings;
pub mod webhook;

pub use api::*;
pub use appointment::*;
pub use availability::*;
pub use client::*;
pub use consent::*;
pub use errors::*;
pub use membership::*;
pub use payment::*;
pub use provider::*;
pub use service::*;
pub use settings::*;
pub use webhook::*;
