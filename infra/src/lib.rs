//! # Infrastructure Layer
//!
//! Concrete implementations of the seams the core defines:
//! - **Database**: MySQL account store using SQLx
//! - **CAPTCHA**: reCAPTCHA verification over HTTP
//! - **Mail**: HTTP mail relay dispatcher
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// CAPTCHA module - external human-verification client
pub mod captcha;

/// Mail module - HTTP relay dispatcher
pub mod mail;

/// Errors raised while wiring or operating infrastructure services.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Configuration missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or query failure
    #[cfg(feature = "mysql")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client failure against an external service
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
