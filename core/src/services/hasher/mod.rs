//! One-way password hashing with a tunable work factor.

use crate::errors::{DomainError, DomainResult};

/// bcrypt cost parameter used for all password hashes.
pub const BCRYPT_COST: u32 = 10;

/// Randomized, self-salting password hasher.
#[derive(Debug, Clone)]
pub struct SecretHasher {
    cost: u32,
}

impl SecretHasher {
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Override the work factor. Used by tests to keep hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password. Each call produces a distinct digest.
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    /// Verify a plaintext against a digest. Mismatches and malformed
    /// digests both return `false`; this never errors.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        bcrypt::verify(plaintext, digest).unwrap_or(false)
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}
