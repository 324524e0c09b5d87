//! JWT issuance and verification tests

use chrono::{Duration, Utc};

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::with_secret("test-secret"))
}

fn account() -> Account {
    Account::new(
        "Ann".to_string(),
        "ann@x.com".to_string(),
        "$2b$10$hash".to_string(),
    )
}

#[test]
fn session_token_round_trips_with_claims() {
    let service = service();
    let account = account();
    let now = Utc::now();

    let token = service.issue_session_token(&account, now).unwrap();
    let claims = service.verify_session_token(&token).unwrap();

    assert_eq!(claims.account_id().unwrap(), account.id);
    assert_eq!(claims.role, "user");
    assert_eq!(claims.purpose, "session");
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn email_token_cannot_open_a_session() {
    let service = service();
    let account = account();
    let now = Utc::now();

    let email_token = service.issue_email_token(&account, now).unwrap();
    let err = service.verify_session_token(&email_token).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidClaims)
    ));

    // The verification path accepts it and yields the account id.
    assert_eq!(service.redeem_email_token(&email_token).unwrap(), account.id);
}

#[test]
fn expired_token_is_rejected() {
    let service = service();
    let account = account();

    // Issued long enough ago that even the 7-day lifetime has lapsed.
    let issued = Utc::now() - Duration::days(8);
    let token = service.issue_session_token(&account, issued).unwrap();

    let err = service.verify_session_token(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Expired)));
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let account = account();
    let now = Utc::now();

    let other = TokenService::new(TokenServiceConfig::with_secret("other-secret"));
    let token = other.issue_session_token(&account, now).unwrap();

    let err = service().verify_session_token(&token).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidSignature)
    ));
}

#[test]
fn garbage_token_is_rejected() {
    let err = service().verify_session_token("not.a.jwt").unwrap_err();
    assert!(matches!(err, DomainError::Token(_)));
}
