//! JWT issuance/verification and reset-capability minting.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Purpose claim on session tokens.
const PURPOSE_SESSION: &str = "session";

/// Purpose claim on email-verification tokens.
const PURPOSE_EMAIL: &str = "verify-email";

/// Claims carried by every JWT the service mints. The `purpose` claim
/// keeps the two JWT kinds from being substituted for one another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    /// Account role at issuance time
    pub role: String,
    /// Token purpose, `session` or `verify-email`
    pub purpose: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims)
    }
}

/// A freshly minted password-reset capability. The raw `token` goes out in
/// the reset mail and is never stored; only `digest` is persisted.
#[derive(Debug, Clone)]
pub struct ResetCapability {
    /// 32 random bytes, hex encoded
    pub token: String,
    /// SHA-256 digest of `token`, hex encoded
    pub digest: String,
    /// Absolute expiry of the capability
    pub expires: DateTime<Utc>,
}

/// Hex-encoded SHA-256 digest of a raw reset token. Lookups recompute this
/// from the presented token.
pub fn digest_of(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Service minting and verifying the three token kinds.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mint a session token for a fully authenticated account.
    pub fn issue_session_token(&self, account: &Account, now: DateTime<Utc>) -> DomainResult<String> {
        self.issue(
            account.id,
            account.role,
            PURPOSE_SESSION,
            Duration::seconds(self.config.session_token_expiry_secs),
            now,
        )
    }

    /// Mint an email-verification token for a newly created account.
    pub fn issue_email_token(&self, account: &Account, now: DateTime<Utc>) -> DomainResult<String> {
        self.issue(
            account.id,
            account.role,
            PURPOSE_EMAIL,
            Duration::seconds(self.config.email_token_expiry_secs),
            now,
        )
    }

    /// Verify a session token and return its claims.
    pub fn verify_session_token(&self, token: &str) -> Result<SessionClaims, DomainError> {
        self.verify(token, PURPOSE_SESSION)
    }

    /// Redeem an email-verification token, yielding the account id.
    pub fn redeem_email_token(&self, token: &str) -> Result<Uuid, DomainError> {
        let claims = self.verify(token, PURPOSE_EMAIL)?;
        Ok(claims.account_id().map_err(DomainError::Token)?)
    }

    /// Mint a reset capability: 32 random bytes for the mail link, a
    /// SHA-256 digest for storage, a one-hour expiry.
    pub fn issue_reset_capability(&self, now: DateTime<Utc>) -> ResetCapability {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let digest = digest_of(&token);
        ResetCapability {
            token,
            digest,
            expires: now + Duration::seconds(self.config.reset_token_expiry_secs),
        }
    }

    fn issue(
        &self,
        account_id: Uuid,
        role: Role,
        purpose: &str,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> DomainResult<String> {
        let claims = SessionClaims {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            purpose: purpose.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    fn verify(&self, token: &str, expected_purpose: &str) -> Result<SessionClaims, DomainError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                let kind = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::InvalidClaims,
                };
                DomainError::Token(kind)
            },
        )?;
        if data.claims.purpose != expected_purpose {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }
        Ok(data.claims)
    }
}
