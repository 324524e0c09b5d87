//! Configuration for the token service

use komik_shared::config::JwtConfig;

/// Session token lifetime in seconds (7 days).
pub const SESSION_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Email-verification token lifetime in seconds (1 hour).
pub const EMAIL_TOKEN_EXPIRY_SECS: i64 = 60 * 60;

/// Reset capability lifetime in seconds (1 hour).
pub const RESET_TOKEN_EXPIRY_SECS: i64 = 60 * 60;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session token expiry in seconds
    pub session_token_expiry_secs: i64,
    /// Email-verification token expiry in seconds
    pub email_token_expiry_secs: i64,
    /// Reset capability expiry in seconds
    pub reset_token_expiry_secs: i64,
    /// Issuer claim stamped on and required from every JWT
    pub issuer: String,
    /// Audience claim stamped on and required from every JWT
    pub audience: String,
}

impl TokenServiceConfig {
    /// Build from the application-level JWT configuration. There is no
    /// default secret; `JwtConfig` refuses to load without one.
    pub fn from_jwt(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            session_token_expiry_secs: jwt.session_token_expiry,
            email_token_expiry_secs: jwt.email_token_expiry,
            reset_token_expiry_secs: RESET_TOKEN_EXPIRY_SECS,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
        }
    }

    /// Config with a caller-supplied secret and the standard lifetimes.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            session_token_expiry_secs: SESSION_TOKEN_EXPIRY_SECS,
            email_token_expiry_secs: EMAIL_TOKEN_EXPIRY_SECS,
            reset_token_expiry_secs: RESET_TOKEN_EXPIRY_SECS,
            issuer: "komik".to_string(),
            audience: "komik-api".to_string(),
        }
    }
}
