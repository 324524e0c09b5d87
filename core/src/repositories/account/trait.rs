//! Account repository trait defining the interface for account persistence.
//!
//! The data store is treated as a generic durable document store. The one
//! hard requirement is atomic per-document updates: every read-modify-write
//! sequence in the authentication core (failure-count increment, OTP
//! issuance, lock transition, password history update) goes through a single
//! `update` call guarded by the account's `version` field, so concurrent
//! attempts against the same account cannot lose writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its (normalized, lowercase) email address.
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account holding the given reset-capability digest.
    ///
    /// Lookup is by digest only; the caller is responsible for the expiry
    /// window check.
    async fn find_by_reset_digest(&self, digest: &str) -> Result<Option<Account>, DomainError>;

    /// Create a new account.
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist an updated account snapshot atomically.
    ///
    /// The write succeeds only when the stored version matches the
    /// snapshot's version; the returned account carries the bumped version.
    /// A version mismatch surfaces as `DomainError::Storage` and means a
    /// concurrent writer won; callers re-read and re-apply.
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
