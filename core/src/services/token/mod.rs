//! Token service module covering the three token kinds:
//! - session JWTs issued after full authentication
//! - email-verification JWTs embedded in signup mails
//! - password-reset capabilities (random bytes, digest stored server-side)

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{digest_of, ResetCapability, SessionClaims, TokenService};
