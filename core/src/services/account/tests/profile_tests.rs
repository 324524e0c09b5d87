//! Profile read and update tests

use uuid::Uuid;

use crate::domain::value_objects::ProfileUpdate;
use crate::errors::{AuthError, DomainError, ValidationError};

use super::harness::{seeded_repo, standard};

fn update() -> ProfileUpdate {
    ProfileUpdate {
        name: None,
        email: None,
        avatar: None,
    }
}

#[tokio::test]
async fn profile_exposes_public_fields_only() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo);

    let profile = service.get_profile(account.id).await.unwrap();
    assert_eq!(profile.id, account.id);
    assert_eq!(profile.email, "ann@x.com");
    assert_eq!(profile.avatar, 1);

    let err = service.get_profile(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo);

    let err = service
        .update_profile(account.id, update())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::EmptyUpdate)
    ));
}

#[tokio::test]
async fn avatar_outside_the_closed_set_is_rejected() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    for value in [0, 7, -1] {
        let err = service
            .update_profile(
                account.id,
                ProfileUpdate {
                    avatar: Some(value),
                    ..update()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidAvatar { .. })
        ));
    }

    let profile = service
        .update_profile(
            account.id,
            ProfileUpdate {
                avatar: Some(6),
                ..update()
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.avatar, 6);
}

#[tokio::test]
async fn email_change_is_normalized_and_checked_for_collisions() {
    let (repo, account) = seeded_repo("ann@x.com").await;
    let (service, _) = standard(repo.clone());

    // Collision with another account.
    let (_, other) = seeded_repo("bob@x.com").await;
    repo.insert(other).await;

    let err = service
        .update_profile(
            account.id,
            ProfileUpdate {
                email: Some("Bob@X.com".to_string()),
                ..update()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));

    let profile = service
        .update_profile(
            account.id,
            ProfileUpdate {
                email: Some("  New@X.com ".to_string()),
                name: Some("Anne".to_string()),
                ..update()
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.email, "new@x.com");
    assert_eq!(profile.name, "Anne");
}
