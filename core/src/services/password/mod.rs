//! Password policy: strength, expiry and reuse prevention.
//!
//! The three checks are independent and composed by the orchestrators:
//! strength applies at signup and reset, expiry at login only, reuse at
//! password change only.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::account::Account;
use crate::errors::{DomainResult, PasswordError, ValidationError};
use crate::services::hasher::SecretHasher;

/// Symbols accepted toward the strength requirement.
pub const ALLOWED_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password age after which logins are refused (days).
pub const MAX_PASSWORD_AGE_DAYS: i64 = 90;

#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_age: Duration,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_age: Duration::days(MAX_PASSWORD_AGE_DAYS),
        }
    }
}

impl PasswordPolicy {
    /// Validate the strength of a candidate password, reporting the first
    /// unmet rule.
    pub fn validate_strength(&self, candidate: &str) -> Result<(), ValidationError> {
        if candidate.len() < self.min_length {
            return Err(ValidationError::PasswordTooWeak {
                rule: format!("must be at least {} characters", self.min_length),
            });
        }
        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::PasswordTooWeak {
                rule: "must contain a lowercase letter".to_string(),
            });
        }
        if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::PasswordTooWeak {
                rule: "must contain an uppercase letter".to_string(),
            });
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::PasswordTooWeak {
                rule: "must contain a digit".to_string(),
            });
        }
        if !candidate.chars().any(|c| ALLOWED_SYMBOLS.contains(c)) {
            return Err(ValidationError::PasswordTooWeak {
                rule: format!("must contain a symbol from {ALLOWED_SYMBOLS}"),
            });
        }
        Ok(())
    }

    /// Whether the account's password is past its maximum age.
    pub fn is_expired(&self, account: &Account, now: DateTime<Utc>) -> bool {
        account.password_expired(now, self.max_age)
    }

    /// Reject the candidate when it matches the current password or any
    /// hash in the bounded history.
    pub fn check_reuse(
        &self,
        hasher: &SecretHasher,
        account: &Account,
        candidate: &str,
    ) -> Result<(), PasswordError> {
        if hasher.verify(candidate, &account.password_hash) {
            return Err(PasswordError::ReuseRejected);
        }
        for old_hash in &account.previous_password_hashes {
            if hasher.verify(candidate, old_hash) {
                return Err(PasswordError::ReuseRejected);
            }
        }
        Ok(())
    }

    /// Commit a new password through the change path: reuse check, hash,
    /// push to history (evicting the oldest past capacity), stamp
    /// `password_changed_at`. The caller persists the account afterwards.
    pub fn commit(
        &self,
        hasher: &SecretHasher,
        account: &mut Account,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.check_reuse(hasher, account, candidate)?;
        let new_hash = hasher.hash(candidate)?;
        account.commit_password_hash(new_hash, now);
        Ok(())
    }
}
