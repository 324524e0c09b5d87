//! Login orchestration module
//!
//! Drives the two-leg login flow: CAPTCHA-gated credential verification
//! followed by a mailed one-time code, with lockout and password-expiry
//! enforcement along the way.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, LoginRequest};
