//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, PasswordError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or missing input; safe to detail to the caller.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credential, OTP, CAPTCHA or lock failures.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Token signature, claim or expiry failures.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Password lifecycle failures.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// An external collaborator (CAPTCHA service, mail relay) failed.
    #[error("{service} unavailable: {message}")]
    Upstream { service: String, message: String },

    /// The data store failed or returned an inconsistent snapshot.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Unexpected internal failure.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
