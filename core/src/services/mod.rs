//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod captcha;
pub mod hasher;
pub mod lockout;
pub mod mail;
pub mod otp;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, SignupRequest, VerificationOutcome};
pub use auth::{AuthService, AuthServiceConfig, LoginRequest};
pub use captcha::{CaptchaVerdict, CaptchaVerifier, StaticCaptchaVerifier};
pub use hasher::SecretHasher;
pub use lockout::LockoutPolicy;
pub use mail::{MailDispatcher, RecordingMailDispatcher, SentMail};
pub use otp::{OtpChallenge, OtpEngine};
pub use password::PasswordPolicy;
pub use token::{ResetCapability, SessionClaims, TokenService, TokenServiceConfig};
