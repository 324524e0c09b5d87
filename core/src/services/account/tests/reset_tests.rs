//! Forgot/reset password flow tests

use chrono::{Duration, Utc};

use crate::errors::{AuthError, DomainError, PasswordError};
use crate::repositories::AccountRepository;
use crate::services::token::digest_of;

use super::harness::{extract_token, hasher, seeded_repo, standard, PASSWORD};

#[tokio::test]
async fn forgot_password_stores_the_digest_and_mails_the_raw_token() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, mail) = standard(repo.clone());

    service.forgot_password("ann@x.com").await.unwrap();

    let token = extract_token(&mail.last().await.unwrap().body, "reset-password/");
    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();

    // The raw token is never persisted; its digest is.
    assert_eq!(stored.reset_token_hash.as_deref(), Some(digest_of(&token).as_str()));
    assert_ne!(stored.reset_token_hash.as_deref(), Some(token.as_str()));
    assert!(stored.reset_token_expires.is_some());
}

#[tokio::test]
async fn forgot_password_for_unknown_email_reports_not_found() {
    let (repo, _) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo);

    let err = service.forgot_password("bob@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn reset_commits_the_new_password_and_is_single_use() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, mail) = standard(repo.clone());

    service.forgot_password("ann@x.com").await.unwrap();
    let token = extract_token(&mail.last().await.unwrap().body, "reset-password/");

    service.reset_password(&token, "Fresh2!pw").await.unwrap();

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(hasher().verify("Fresh2!pw", &stored.password_hash));
    assert!(stored.reset_token_hash.is_none());
    assert!(stored.reset_token_expires.is_none());
    assert!(stored.password_changed_at.is_some());

    // Second redemption fails: the digest was cleared with the commit.
    let err = service
        .reset_password(&token, "Again3!pw")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredLink)
    ));
}

#[tokio::test]
async fn expired_capability_is_rejected() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, mail) = standard(repo.clone());

    service.forgot_password("ann@x.com").await.unwrap();
    let token = extract_token(&mail.last().await.unwrap().body, "reset-password/");

    let mut stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    stored.reset_token_expires = Some(Utc::now() - Duration::seconds(1));
    repo.insert(stored).await;

    let err = service
        .reset_password(&token, "Fresh2!pw")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredLink)
    ));
}

#[tokio::test]
async fn reusing_a_recent_password_is_rejected() {
    let (repo, _) = seeded_repo("ann@x.com").await;
    let (service, mail) = standard(repo.clone());

    service.forgot_password("ann@x.com").await.unwrap();
    let token = extract_token(&mail.last().await.unwrap().body, "reset-password/");

    let err = service.reset_password(&token, PASSWORD).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Password(PasswordError::ReuseRejected)
    ));

    // The rejection consumed nothing: the same link still works with a
    // genuinely new password.
    service.reset_password(&token, "Fresh2!pw").await.unwrap();
}

#[tokio::test]
async fn a_fresh_capability_supersedes_the_old_one() {
    let (repo, _) = seeded_repo("ann@x.com").await;
    let (service, mail) = standard(repo.clone());

    service.forgot_password("ann@x.com").await.unwrap();
    let first = extract_token(&mail.last().await.unwrap().body, "reset-password/");

    service.forgot_password("ann@x.com").await.unwrap();
    let second = extract_token(&mail.last().await.unwrap().body, "reset-password/");

    let err = service
        .reset_password(&first, "Fresh2!pw")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredLink)
    ));
    service.reset_password(&second, "Fresh2!pw").await.unwrap();
}
