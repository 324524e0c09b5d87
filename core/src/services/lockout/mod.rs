//! Lockout policy for brute-force mitigation.
//!
//! State machine per account: `Open -> Locked -> Open`. Five consecutive
//! failed verifications lock the account for thirty minutes. While locked,
//! every attempt is rejected before any CAPTCHA or credential work. The lock
//! opens implicitly once `lock_until` passes; no background timer is
//! involved.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::entities::account::Account;

/// Default failure threshold before locking.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Default lock duration in minutes.
pub const LOCK_DURATION_MINUTES: i64 = 30;

/// Threshold and duration applied by the login orchestrator.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    pub max_failed_attempts: u32,
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: MAX_FAILED_ATTEMPTS,
            lock_duration: Duration::minutes(LOCK_DURATION_MINUTES),
        }
    }
}

impl LockoutPolicy {
    /// Remaining lock time, after clearing a naturally expired lock.
    /// Clearing also resets the failure counter, so a fresh attempt after
    /// expiry starts from zero.
    pub fn refresh(&self, account: &mut Account, now: DateTime<Utc>) -> Option<Duration> {
        account.clear_expired_lock(now);
        account.lock_remaining(now)
    }

    /// Record a failed verification, locking on the threshold. Returns
    /// `true` when this failure transitioned the account to `Locked`.
    pub fn register_failure(&self, account: &mut Account, now: DateTime<Utc>) -> bool {
        let locked =
            account.record_failed_login(now, self.max_failed_attempts, self.lock_duration);
        if locked {
            warn!(
                account_id = %account.id,
                attempts = account.failed_login_attempts,
                "account locked after repeated failed login attempts"
            );
        }
        locked
    }
}
