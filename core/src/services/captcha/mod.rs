//! Human-verification gate for the first login leg.
//!
//! The core only defines the seam; the production implementation lives in
//! the infrastructure crate and talks to the external verification
//! endpoint. A rejected or unreachable verifier always fails closed.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Result of a verification round-trip. `error_codes` carries the
/// upstream's diagnostic codes when the challenge is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptchaVerdict {
    pub success: bool,
    pub error_codes: Vec<String>,
}

impl CaptchaVerdict {
    pub fn accepted() -> Self {
        Self {
            success: true,
            error_codes: Vec::new(),
        }
    }

    pub fn rejected(error_codes: Vec<String>) -> Self {
        Self {
            success: false,
            error_codes,
        }
    }
}

/// External CAPTCHA verification seam.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Verify a client-supplied challenge response. Transport failures
    /// surface as `DomainError::Upstream`, never as a rejection verdict.
    async fn verify(&self, token: &str) -> DomainResult<CaptchaVerdict>;
}

/// Canned verifier used by tests and local development.
pub struct StaticCaptchaVerifier {
    verdict: CaptchaVerdict,
}

impl StaticCaptchaVerifier {
    pub fn accepting() -> Self {
        Self {
            verdict: CaptchaVerdict::accepted(),
        }
    }

    pub fn rejecting(error_codes: Vec<String>) -> Self {
        Self {
            verdict: CaptchaVerdict::rejected(error_codes),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for StaticCaptchaVerifier {
    async fn verify(&self, _token: &str) -> DomainResult<CaptchaVerdict> {
        Ok(self.verdict.clone())
    }
}
