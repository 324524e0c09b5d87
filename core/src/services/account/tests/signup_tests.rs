//! Signup and email-verification tests

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{AccountRepository, MockAccountRepository};
use crate::services::account::VerificationOutcome;

use super::harness::{build, extract_token, seeded_repo, signup, standard, PASSWORD};

#[tokio::test]
async fn signup_creates_an_unverified_account_and_mails_a_link() {
    let repo = Arc::new(MockAccountRepository::new());
    let (service, mail) = standard(repo.clone());

    service
        .signup(signup("Ann", "Ann@X.com", PASSWORD))
        .await
        .unwrap();

    let stored = repo.find_by_email("ann@x.com").await.unwrap().unwrap();
    assert!(!stored.is_verified);
    assert!(stored.previous_password_hashes.is_empty());

    let sent = mail.last().await.unwrap();
    assert_eq!(sent.to, "ann@x.com");
    assert!(sent.body.contains("verify-email?token="));
}

#[tokio::test]
async fn signup_rejects_duplicates_weak_passwords_and_bad_emails() {
    let (repo, _) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo);

    let err = service
        .signup(signup("Ann", "ann@x.com", PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));

    let err = service
        .signup(signup("Bob", "bob@x.com", "weak"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PasswordTooWeak { .. })
    ));

    let err = service
        .signup(signup("Bob", "not-an-email", PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::InvalidEmail)
    ));

    let err = service
        .signup(signup("  ", "bob@x.com", PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn verification_link_flips_the_flag_once() {
    let repo = Arc::new(MockAccountRepository::new());
    let (service, mail) = standard(repo.clone());

    service
        .signup(signup("Ann", "ann@x.com", PASSWORD))
        .await
        .unwrap();
    let token = extract_token(&mail.last().await.unwrap().body, "token=");

    assert_eq!(
        service.verify_email(&token).await.unwrap(),
        VerificationOutcome::Verified
    );
    assert!(repo
        .find_by_email("ann@x.com")
        .await
        .unwrap()
        .unwrap()
        .is_verified);

    // Redeeming again is an idempotent success.
    assert_eq!(
        service.verify_email(&token).await.unwrap(),
        VerificationOutcome::AlreadyVerified
    );
}

#[tokio::test]
async fn garbage_verification_token_is_an_invalid_link() {
    let repo = Arc::new(MockAccountRepository::new());
    let (service, _) = standard(repo);

    let err = service.verify_email("not-a-token").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredLink)
    ));
}

#[tokio::test]
async fn session_token_does_not_verify_an_email() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo);

    let session = super::harness::token_service()
        .issue_session_token(&account, chrono::Utc::now())
        .unwrap();
    let err = service.verify_email(&session).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredLink)
    ));
}

#[tokio::test]
async fn mail_outage_surfaces_as_a_signup_failure() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = build(
        repo.clone(),
        Arc::new(crate::services::mail::FailingMailDispatcher),
    );

    let err = service
        .signup(signup("Ann", "ann@x.com", PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Upstream { .. }));
}
