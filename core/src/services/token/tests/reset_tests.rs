//! Reset capability tests

use chrono::{Duration, Utc};

use crate::services::token::{digest_of, TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::with_secret("test-secret"))
}

#[test]
fn capability_token_is_hex_of_32_bytes() {
    let now = Utc::now();
    let capability = service().issue_reset_capability(now);

    assert_eq!(capability.token.len(), 64);
    assert!(capability.token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(capability.expires, now + Duration::hours(1));
}

#[test]
fn stored_digest_matches_recomputed_digest() {
    let capability = service().issue_reset_capability(Utc::now());
    assert_eq!(digest_of(&capability.token), capability.digest);
    // The digest never equals the raw token.
    assert_ne!(capability.digest, capability.token);
}

#[test]
fn capabilities_are_unique() {
    let service = service();
    let now = Utc::now();
    let a = service.issue_reset_capability(now);
    let b = service.issue_reset_capability(now);
    assert_ne!(a.token, b.token);
    assert_ne!(a.digest, b.digest);
}
