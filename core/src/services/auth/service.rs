//! Main login orchestrator implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use komik_shared::utils::email::{mask_email, normalize_email};

use crate::domain::value_objects::{LoginOutcome, PublicUser};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::captcha::CaptchaVerifier;
use crate::services::hasher::SecretHasher;
use crate::services::mail::{MailDispatcher, SentMail};
use crate::services::otp::OtpEngine;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// One login submission. The same endpoint serves both legs: without `otp`
/// it is the CAPTCHA-gated credential leg, with `otp` it is the code leg.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub otp: Option<String>,
    pub captcha_token: Option<String>,
}

/// Login orchestrator wiring the account store, CAPTCHA verifier and mail
/// dispatcher behind the two-leg flow.
pub struct AuthService<R, C, M>
where
    R: AccountRepository,
    C: CaptchaVerifier,
    M: MailDispatcher,
{
    /// Account repository for persistence
    repository: Arc<R>,
    /// External human-verification gate
    captcha: Arc<C>,
    /// Outbound mail relay
    mail: Arc<M>,
    /// Session and verification token minting
    token_service: Arc<TokenService>,
    /// Password hashing
    hasher: SecretHasher,
    /// One-time code generation and validation
    otp_engine: OtpEngine,
    /// Lockout and password policies
    config: AuthServiceConfig,
}

impl<R, C, M> AuthService<R, C, M>
where
    R: AccountRepository,
    C: CaptchaVerifier,
    M: MailDispatcher,
{
    pub fn new(
        repository: Arc<R>,
        captcha: Arc<C>,
        mail: Arc<M>,
        token_service: Arc<TokenService>,
        hasher: SecretHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            repository,
            captcha,
            mail,
            token_service,
            hasher,
            otp_engine: OtpEngine::new(),
            config,
        }
    }

    /// Run one login submission to a definitive outcome.
    ///
    /// Branch order: field presence, CAPTCHA (first leg only), account
    /// lookup, password expiry, lock state, credential verification, then
    /// either OTP issuance or OTP redemption. Counter, lock and OTP fields
    /// are persisted in a single versioned update per branch, and only
    /// after any external call has succeeded.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<LoginOutcome> {
        if request.email.trim().is_empty() {
            return Err(ValidationError::required("email").into());
        }
        if request.password.is_empty() {
            return Err(ValidationError::required("password").into());
        }
        if request.otp.is_none() && request.captcha_token.is_none() {
            return Err(ValidationError::CaptchaTokenMissing.into());
        }

        let email = normalize_email(&request.email).ok_or(ValidationError::InvalidEmail)?;

        // First leg: the CAPTCHA stands in for the not-yet-issued OTP. A
        // rejected challenge never counts against the lockout counter.
        if request.otp.is_none() {
            let token = request
                .captcha_token
                .as_deref()
                .ok_or(ValidationError::CaptchaTokenMissing)?;
            let verdict = self.captcha.verify(token).await?;
            if !verdict.success {
                debug!(email = %mask_email(&email), "captcha rejected");
                return Err(AuthError::CaptchaRejected {
                    error_codes: verdict.error_codes,
                }
                .into());
            }
        }

        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        let now = Utc::now();

        // Expiry is checked before lock state: an expired password is
        // rejected even on a locked account.
        if self.config.password.is_expired(&account, now) {
            return Err(AuthError::PasswordExpired.into());
        }

        self.config.lockout.refresh(&mut account, now);
        if let Some(unlock_at) = account.lock_until {
            return Err(AuthError::AccountLocked { unlock_at }.into());
        }

        if !self.hasher.verify(&request.password, &account.password_hash) {
            self.config.lockout.register_failure(&mut account, now);
            self.repository.update(account).await?;
            return Err(AuthError::InvalidCredentials.into());
        }

        account.reset_lockout();

        match request.otp {
            None => {
                // Overwrites any pending code. The mail goes out before the
                // code is persisted so a relay failure leaves no dangling
                // challenge on the record.
                let challenge = self.otp_engine.issue(now);
                self.mail
                    .send(SentMail {
                        to: account.email.clone(),
                        subject: "Your login verification code".to_string(),
                        body: format!(
                            "<p>Your verification code is <b>{}</b>. It expires in 10 minutes.</p>",
                            challenge.code
                        ),
                    })
                    .await?;
                account.set_otp(challenge.code, challenge.expires);
                self.repository.update(account).await?;
                debug!(email = %mask_email(&email), "otp issued");
                Ok(LoginOutcome::OtpRequired)
            }
            Some(code) => {
                if !self.otp_engine.validate(
                    &code,
                    account.otp_code.as_deref(),
                    account.otp_expires,
                    now,
                ) {
                    return Err(AuthError::InvalidOtp.into());
                }
                account.clear_otp();
                let account = self.repository.update(account).await?;
                let token = self.token_service.issue_session_token(&account, now)?;
                info!(email = %mask_email(&email), "login succeeded");
                Ok(LoginOutcome::Authenticated {
                    token,
                    user: PublicUser::from(&account),
                })
            }
        }
    }
}
