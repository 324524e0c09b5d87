//! Account entity representing a registered user of the Komik platform.
//!
//! The account record is the unit of consistency for the authentication
//! core: failure counters, lock state, OTP state and reset-token state all
//! live on it and are persisted through a single versioned update.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of prior password hashes retained for reuse checks.
pub const PASSWORD_HISTORY_CAPACITY: usize = 3;

/// Role carried into the session token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Account entity holding identity and security state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique, stored lowercase
    pub email: String,

    /// Role tagged onto session tokens
    pub role: Role,

    /// Avatar selection, closed set 1..=6
    pub avatar: i32,

    /// Current password hash
    pub password_hash: String,

    /// Bounded history of prior password hashes, oldest first
    pub previous_password_hashes: Vec<String>,

    /// Timestamp of the last password change
    pub password_changed_at: Option<DateTime<Utc>>,

    /// Consecutive failed login attempts since the last success
    pub failed_login_attempts: u32,

    /// When set and in the future, logins are rejected outright
    pub lock_until: Option<DateTime<Utc>>,

    /// Pending one-time code; set and cleared together with `otp_expires`
    pub otp_code: Option<String>,

    /// Absolute expiry of the pending one-time code
    pub otp_expires: Option<DateTime<Utc>>,

    /// SHA-256 digest of the outstanding reset capability token
    pub reset_token_hash: Option<String>,

    /// Absolute expiry of the outstanding reset capability
    pub reset_token_expires: Option<DateTime<Utc>>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Optimistic concurrency version, bumped by the repository on update
    pub version: i64,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account. The password hash is seeded
    /// directly; the history starts empty and only grows through the
    /// password-change path.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            role: Role::User,
            avatar: 1,
            password_hash,
            previous_password_hashes: Vec::new(),
            password_changed_at: Some(now),
            failed_login_attempts: 0,
            lock_until: None,
            otp_code: None,
            otp_expires: None,
            reset_token_hash: None,
            reset_token_expires: None,
            is_verified: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Remaining lock time, if the account is currently locked.
    pub fn lock_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.lock_until {
            Some(until) if until > now => Some(until - now),
            _ => None,
        }
    }

    /// Clears a naturally expired lock and resets the failure counter.
    /// Returns `true` when state was cleared.
    pub fn clear_expired_lock(&mut self, now: DateTime<Utc>) -> bool {
        match self.lock_until {
            Some(until) if until <= now => {
                self.lock_until = None;
                self.failed_login_attempts = 0;
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Records a failed credential verification. When the attempt count
    /// reaches `max_attempts` the account is locked for `lock_duration`.
    /// Returns `true` when this failure triggered the lock.
    pub fn record_failed_login(
        &mut self,
        now: DateTime<Utc>,
        max_attempts: u32,
        lock_duration: Duration,
    ) -> bool {
        self.failed_login_attempts += 1;
        self.touch();
        if self.failed_login_attempts >= max_attempts {
            self.lock_until = Some(now + lock_duration);
            return true;
        }
        false
    }

    /// Resets the failure counter and clears any lock.
    pub fn reset_lockout(&mut self) {
        self.failed_login_attempts = 0;
        self.lock_until = None;
        self.touch();
    }

    /// Stores a pending one-time code. Both fields are set together.
    pub fn set_otp(&mut self, code: String, expires: DateTime<Utc>) {
        self.otp_code = Some(code);
        self.otp_expires = Some(expires);
        self.touch();
    }

    /// Clears the pending one-time code. Both fields are cleared together.
    pub fn clear_otp(&mut self) {
        self.otp_code = None;
        self.otp_expires = None;
        self.touch();
    }

    /// Stores an outstanding reset capability digest.
    pub fn set_reset_token(&mut self, digest: String, expires: DateTime<Utc>) {
        self.reset_token_hash = Some(digest);
        self.reset_token_expires = Some(expires);
        self.touch();
    }

    /// Invalidates the outstanding reset capability.
    pub fn clear_reset_token(&mut self) {
        self.reset_token_hash = None;
        self.reset_token_expires = None;
        self.touch();
    }

    /// Replaces the current password hash, pushing it through the bounded
    /// history and stamping `password_changed_at`.
    pub fn commit_password_hash(&mut self, new_hash: String, now: DateTime<Utc>) {
        if self.previous_password_hashes.len() >= PASSWORD_HISTORY_CAPACITY {
            self.previous_password_hashes.remove(0);
        }
        self.previous_password_hashes.push(new_hash.clone());
        self.password_hash = new_hash;
        self.password_changed_at = Some(now);
        self.touch();
    }

    /// Whether the password is older than `max_age`.
    pub fn password_expired(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.password_changed_at {
            Some(changed_at) => now > changed_at + max_age,
            None => false,
        }
    }

    /// Marks the email address as verified. Returns `false` when the account
    /// was already verified (redeeming twice is a no-op).
    pub fn mark_verified(&mut self) -> bool {
        if self.is_verified {
            return false;
        }
        self.is_verified = true;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "Ann".to_string(),
            "ann@x.com".to_string(),
            "$2b$10$hash".to_string(),
        )
    }

    #[test]
    fn new_account_is_unverified_with_empty_history() {
        let account = account();
        assert!(!account.is_verified);
        assert!(account.previous_password_hashes.is_empty());
        assert_eq!(account.failed_login_attempts, 0);
        assert_eq!(account.avatar, 1);
        assert_eq!(account.role, Role::User);
        assert!(account.lock_until.is_none());
        assert!(account.password_changed_at.is_some());
    }

    #[test]
    fn fifth_failure_locks_the_account() {
        let mut account = account();
        let now = Utc::now();
        for _ in 0..4 {
            assert!(!account.record_failed_login(now, 5, Duration::minutes(30)));
            assert!(account.lock_until.is_none());
        }
        assert!(account.record_failed_login(now, 5, Duration::minutes(30)));
        let until = account.lock_until.expect("locked");
        assert_eq!(until, now + Duration::minutes(30));
        assert!(account.lock_remaining(now).is_some());
    }

    #[test]
    fn expired_lock_clears_and_resets_counter() {
        let mut account = account();
        let now = Utc::now();
        for _ in 0..5 {
            account.record_failed_login(now, 5, Duration::minutes(30));
        }
        let later = now + Duration::minutes(31);
        assert!(account.lock_remaining(later).is_none());
        assert!(account.clear_expired_lock(later));
        assert_eq!(account.failed_login_attempts, 0);
        assert!(account.lock_until.is_none());
    }

    #[test]
    fn otp_fields_move_together() {
        let mut account = account();
        let expires = Utc::now() + Duration::minutes(10);
        account.set_otp("123456".to_string(), expires);
        assert!(account.otp_code.is_some() && account.otp_expires.is_some());
        account.clear_otp();
        assert!(account.otp_code.is_none() && account.otp_expires.is_none());
    }

    #[test]
    fn password_history_evicts_oldest_past_capacity() {
        let mut account = account();
        let now = Utc::now();
        for i in 0..4 {
            account.commit_password_hash(format!("hash-{i}"), now);
        }
        assert_eq!(account.previous_password_hashes.len(), 3);
        assert_eq!(
            account.previous_password_hashes,
            vec!["hash-1", "hash-2", "hash-3"]
        );
        assert_eq!(account.password_hash, "hash-3");
    }

    #[test]
    fn password_expiry_is_lazy() {
        let mut account = account();
        let now = Utc::now();
        assert!(!account.password_expired(now, Duration::days(90)));
        account.password_changed_at = Some(now - Duration::days(91));
        assert!(account.password_expired(now, Duration::days(90)));
        account.password_changed_at = None;
        assert!(!account.password_expired(now, Duration::days(90)));
    }

    #[test]
    fn verification_is_idempotent() {
        let mut account = account();
        assert!(account.mark_verified());
        assert!(!account.mark_verified());
        assert!(account.is_verified);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::User.as_str(), "user");
    }
}
