//! Lockout behavior through the orchestrator

use chrono::{Duration, Utc};

use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainError};
use crate::repositories::AccountRepository;

use super::harness::{first_leg, seeded_repo, standard, PASSWORD};

#[tokio::test]
async fn wrong_password_increments_the_persisted_counter() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    for expected in 1..=3u32 {
        let err = service
            .login(first_leg("ann@x.com", "Wrong1!pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
        let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(stored.failed_login_attempts, expected);
    }
}

#[tokio::test]
async fn sixth_attempt_is_locked_out_even_with_the_correct_password() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    for _ in 0..5 {
        let _ = service.login(first_leg("ann@x.com", "Wrong1!pw")).await;
    }
    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.lock_until.is_some());

    // Correct password, still rejected: the lock check runs before any
    // hash comparison.
    let err = service
        .login(first_leg("ann@x.com", PASSWORD))
        .await
        .unwrap_err();
    match err {
        DomainError::Auth(AuthError::AccountLocked { unlock_at }) => {
            assert_eq!(Some(unlock_at), stored.lock_until);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn lock_opens_after_expiry_and_counter_restarts_at_zero() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    for _ in 0..5 {
        let _ = service.login(first_leg("ann@x.com", "Wrong1!pw")).await;
    }

    // Backdate the lock so it has naturally expired.
    let mut stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    stored.lock_until = Some(Utc::now() - Duration::seconds(1));
    repo.insert(stored).await;

    let outcome = service
        .login(first_leg("ann@x.com", PASSWORD))
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::OtpRequired));

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.lock_until.is_none());
}

#[tokio::test]
async fn successful_credential_leg_resets_an_accumulated_counter() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    for _ in 0..3 {
        let _ = service.login(first_leg("ann@x.com", "Wrong1!pw")).await;
    }

    service
        .login(first_leg("ann@x.com", PASSWORD))
        .await
        .unwrap();

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
}
