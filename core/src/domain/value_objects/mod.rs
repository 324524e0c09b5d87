//! Value objects shared across services.

pub mod auth_response;
pub mod profile;

pub use auth_response::{LoginOutcome, PublicUser};
pub use profile::ProfileUpdate;
