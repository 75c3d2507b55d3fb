pub mod appointments;
pub mod auth;
pub mod availability;
pub mod catalog;
pub mod clients;
pub mod consents;
pub mod dashboard;
pub mod memberships;
pub mod payments;
pub mod providers;
pub mod site;
pub mod system;
pub mod webhooks;

// Re-export all handler functions for easy importing
pub use appointments::*;
pub use auth::*;
pub use availability::*;
pub use catalog::*;
pub use clients::*;
pub use consents::*;
pub use dashboard::*;
pub use memberships::*;
pub use payments::*;
pub use providers::*;
pub use site::*;
pub use system::*;
pub use webhooks::*;
