//! # Komik Core
//!
//! Core business logic and domain layer for the Komik backend's
//! authentication and account-security subsystem. This crate contains the
//! account entity, business services (login orchestration, signup and
//! verification, OTP, lockout, password lifecycle, token issuance),
//! repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{AccountRepository, MockAccountRepository};
pub use services::{
    AccountService, AuthService, AuthServiceConfig, CaptchaVerdict, CaptchaVerifier,
    LockoutPolicy, LoginRequest, MailDispatcher, OtpChallenge, OtpEngine, PasswordPolicy,
    RecordingMailDispatcher, ResetCapability, SecretHasher, SentMail, SessionClaims,
    SignupRequest, StaticCaptchaVerifier, TokenService, TokenServiceConfig, VerificationOutcome,
};
