//! One-time password generation and validation for the second login leg.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;

/// Validity window of an issued code, in minutes.
pub const OTP_TTL_MINUTES: i64 = 10;

/// A freshly generated code and its absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpChallenge {
    pub code: String,
    pub expires: DateTime<Utc>,
}

/// Generator and validator for six-digit one-time codes.
#[derive(Debug, Clone)]
pub struct OtpEngine {
    ttl: Duration,
}

impl Default for OtpEngine {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(OTP_TTL_MINUTES),
        }
    }
}

impl OtpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a uniformly random six-digit code. The range is inclusive
    /// of both bounds, so leading digits are never zero.
    pub fn issue(&self, now: DateTime<Utc>) -> OtpChallenge {
        let code = OsRng.gen_range(100_000..=999_999u32);
        OtpChallenge {
            code: code.to_string(),
            expires: now + self.ttl,
        }
    }

    /// Check a submitted code against the stored one. Comparison is
    /// constant-time; an expired or absent stored code never matches.
    pub fn validate(
        &self,
        submitted: &str,
        stored: Option<&str>,
        expires: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        let (Some(stored), Some(expires)) = (stored, expires) else {
            return false;
        };
        if now > expires {
            return false;
        }
        constant_time_eq(submitted.as_bytes(), stored.as_bytes())
    }
}
