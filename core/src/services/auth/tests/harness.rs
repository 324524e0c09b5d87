//! Shared fixtures for login orchestrator tests

use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::repositories::MockAccountRepository;
use crate::services::auth::{AuthService, AuthServiceConfig, LoginRequest};
use crate::services::captcha::{CaptchaVerifier, StaticCaptchaVerifier};
use crate::services::hasher::SecretHasher;
use crate::services::mail::{MailDispatcher, RecordingMailDispatcher};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Password every seeded account is created with.
pub const PASSWORD: &str = "Correct1!pw";

pub fn hasher() -> SecretHasher {
    SecretHasher::with_cost(4)
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::with_secret(
        "test-secret",
    )))
}

pub fn build<C, M>(
    repo: Arc<MockAccountRepository>,
    captcha: C,
    mail: Arc<M>,
) -> AuthService<MockAccountRepository, C, M>
where
    C: CaptchaVerifier,
    M: MailDispatcher,
{
    AuthService::new(
        repo,
        Arc::new(captcha),
        mail,
        token_service(),
        hasher(),
        AuthServiceConfig::default(),
    )
}

/// Standard harness: accepting CAPTCHA, recording mail dispatcher.
pub fn standard(
    repo: Arc<MockAccountRepository>,
) -> (
    AuthService<MockAccountRepository, StaticCaptchaVerifier, RecordingMailDispatcher>,
    Arc<RecordingMailDispatcher>,
) {
    let mail = Arc::new(RecordingMailDispatcher::new());
    let service = build(repo, StaticCaptchaVerifier::accepting(), mail.clone());
    (service, mail)
}

/// Repository pre-seeded with one verified account for `email`.
pub async fn seeded_repo(email: &str) -> (Arc<MockAccountRepository>, Account) {
    let repo = Arc::new(MockAccountRepository::new());
    let mut account = Account::new(
        "Ann".to_string(),
        email.to_string(),
        hasher().hash(PASSWORD).unwrap(),
    );
    account.is_verified = true;
    repo.insert(account.clone()).await;
    (repo, account)
}

/// First-leg request: no OTP, CAPTCHA token attached.
pub fn first_leg(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        otp: None,
        captcha_token: Some("captcha-response".to_string()),
    }
}

/// Second-leg request: OTP attached, no CAPTCHA token.
pub fn second_leg(email: &str, password: &str, otp: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        otp: Some(otp.to_string()),
        captcha_token: None,
    }
}
