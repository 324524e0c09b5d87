//! Account lifecycle service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use komik_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::account::Account;
use crate::domain::value_objects::{ProfileUpdate, PublicUser};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::hasher::SecretHasher;
use crate::services::mail::{MailDispatcher, SentMail};
use crate::services::password::PasswordPolicy;
use crate::services::token::{digest_of, TokenService};

/// Lowest avatar selection in the closed set.
const AVATAR_MIN: i32 = 1;

/// Highest avatar selection in the closed set.
const AVATAR_MAX: i32 = 6;

/// One signup submission.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of redeeming a verification link. Redeeming twice is not an
/// error; the second redemption reports the account was already verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
}

/// Account lifecycle service: signup, verification, password reset and
/// profile management.
pub struct AccountService<R, M>
where
    R: AccountRepository,
    M: MailDispatcher,
{
    /// Account repository for persistence
    repository: Arc<R>,
    /// Outbound mail relay
    mail: Arc<M>,
    /// Verification token and reset capability minting
    token_service: Arc<TokenService>,
    /// Password hashing
    hasher: SecretHasher,
    /// Strength and reuse rules
    password: PasswordPolicy,
    /// Base URL the verification and reset links point at
    client_url: String,
}

impl<R, M> AccountService<R, M>
where
    R: AccountRepository,
    M: MailDispatcher,
{
    pub fn new(
        repository: Arc<R>,
        mail: Arc<M>,
        token_service: Arc<TokenService>,
        hasher: SecretHasher,
        password: PasswordPolicy,
        client_url: String,
    ) -> Self {
        Self {
            repository,
            mail,
            token_service,
            hasher,
            password,
            client_url,
        }
    }

    /// Create an unverified account and dispatch its verification link.
    /// Never logs the caller in.
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<()> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name").into());
        }
        let email = normalize_email(&request.email).ok_or(ValidationError::InvalidEmail)?;
        self.password.validate_strength(&request.password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let hash = self.hasher.hash(&request.password)?;
        let account = Account::new(name.to_string(), email.clone(), hash);
        let account = self.repository.create(account).await?;

        let now = Utc::now();
        let token = self.token_service.issue_email_token(&account, now)?;
        self.mail
            .send(SentMail {
                to: account.email.clone(),
                subject: "Verify your email address".to_string(),
                body: format!(
                    "<p>Welcome! Click <a href=\"{}/verify-email?token={}\">here</a> \
                     to verify your email address. The link expires in 1 hour.</p>",
                    self.client_url, token
                ),
            })
            .await?;

        info!(email = %mask_email(&email), "account created, verification mail sent");
        Ok(())
    }

    /// Redeem a verification link.
    pub async fn verify_email(&self, token: &str) -> DomainResult<VerificationOutcome> {
        let account_id = self
            .token_service
            .redeem_email_token(token)
            .map_err(|_| AuthError::InvalidOrExpiredLink)?;

        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredLink)?;

        if !account.mark_verified() {
            return Ok(VerificationOutcome::AlreadyVerified);
        }
        self.repository.update(account).await?;
        Ok(VerificationOutcome::Verified)
    }

    /// Issue a reset capability and mail the raw token. Only its digest is
    /// persisted, and only after the mail has gone out.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email).ok_or(ValidationError::InvalidEmail)?;
        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let now = Utc::now();
        let capability = self.token_service.issue_reset_capability(now);
        self.mail
            .send(SentMail {
                to: account.email.clone(),
                subject: "Reset your password".to_string(),
                body: format!(
                    "<p>Click <a href=\"{}/reset-password/{}\">here</a> to reset \
                     your password. The link expires in 1 hour.</p>",
                    self.client_url, capability.token
                ),
            })
            .await?;

        account.set_reset_token(capability.digest, capability.expires);
        self.repository.update(account).await?;
        info!(email = %mask_email(&email), "reset link issued");
        Ok(())
    }

    /// Redeem a reset capability and commit the new password. The
    /// capability is single-use: the digest is cleared in the same update
    /// that commits the password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        self.password.validate_strength(new_password)?;

        let mut account = self
            .repository
            .find_by_reset_digest(&digest_of(token))
            .await?
            .ok_or(AuthError::InvalidOrExpiredLink)?;

        let now = Utc::now();
        match account.reset_token_expires {
            Some(expires) if expires >= now => {}
            _ => return Err(AuthError::InvalidOrExpiredLink.into()),
        }

        self.password
            .commit(&self.hasher, &mut account, new_password, now)?;
        account.clear_reset_token();
        self.repository.update(account).await?;
        info!("password reset committed");
        Ok(())
    }

    /// Public view of an account.
    pub async fn get_profile(&self, id: Uuid) -> DomainResult<PublicUser> {
        let account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        Ok(PublicUser::from(&account))
    }

    /// Apply a partial profile update and return the new public view.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> DomainResult<PublicUser> {
        if update.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }

        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::required("name").into());
            }
            account.name = name;
        }
        if let Some(email) = update.email {
            let email = normalize_email(&email).ok_or(ValidationError::InvalidEmail)?;
            if email != account.email {
                if self.repository.find_by_email(&email).await?.is_some() {
                    return Err(AuthError::UserAlreadyExists.into());
                }
                account.email = email;
            }
        }
        if let Some(avatar) = update.avatar {
            if !(AVATAR_MIN..=AVATAR_MAX).contains(&avatar) {
                return Err(ValidationError::InvalidAvatar { value: avatar }.into());
            }
            account.avatar = avatar;
        }

        let account = self.repository.update(account).await?;
        Ok(PublicUser::from(&account))
    }
}
