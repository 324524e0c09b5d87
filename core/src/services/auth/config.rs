//! Configuration for the login orchestrator

use crate::services::lockout::LockoutPolicy;
use crate::services::password::PasswordPolicy;

/// Policies applied by the login orchestrator.
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Failure threshold and lock duration
    pub lockout: LockoutPolicy,
    /// Strength, expiry and reuse rules
    pub password: PasswordPolicy,
}
