//! Error type definitions for authentication, token management, password
//! lifecycle and validation operations.
//!
//! Every business-rule failure is a typed variant; callers must never
//! inspect message strings to distinguish outcomes.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    AccountNotFound,

    #[error("Account locked until {unlock_at}")]
    AccountLocked { unlock_at: DateTime<Utc> },

    #[error("Password expired, please reset it")]
    PasswordExpired,

    #[error("Captcha verification failed")]
    CaptchaRejected { error_codes: Vec<String> },

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid or expired link")]
    InvalidOrExpiredLink,
}

/// Token-related errors
///
/// The distinction between variants is internal; the API surface collapses
/// them all to a single "invalid or expired" outcome.
#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Invalid or expired token")]
    InvalidOrExpired,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Captcha token is required")]
    CaptchaTokenMissing,

    #[error("Password too weak: {rule}")]
    PasswordTooWeak { rule: String },

    #[error("Invalid avatar selection")]
    InvalidAvatar { value: i32 },

    #[error("No valid fields to update")]
    EmptyUpdate,
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }
}

/// Password lifecycle errors
#[derive(Error, Debug, PartialEq)]
pub enum PasswordError {
    #[error("New password must not match any of your recent passwords")]
    ReuseRejected,
}
