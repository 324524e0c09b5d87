//! Authentication, CAPTCHA and mail dispatch configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// JWT signing configuration.
///
/// The secret is mandatory: there is deliberately no embedded default, and a
/// missing `JWT_SECRET` is a fatal startup error rather than a silently
/// insecure fallback.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing secret (HS256).
    pub secret: String,

    /// Session token lifetime in seconds.
    pub session_token_expiry: i64,

    /// Email-verification token lifetime in seconds.
    pub email_token_expiry: i64,

    /// JWT issuer claim.
    pub issuer: String,

    /// JWT audience claim.
    pub audience: String,
}

impl JwtConfig {
    /// Build from environment variables. Fails if `JWT_SECRET` is absent or
    /// empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::missing("JWT_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::new("JWT_SECRET must not be empty"));
        }

        let session_token_expiry = env_i64("JWT_SESSION_TOKEN_EXPIRY", 7 * 86_400);
        let email_token_expiry = env_i64("JWT_EMAIL_TOKEN_EXPIRY", 3_600);

        Ok(Self {
            secret,
            session_token_expiry,
            email_token_expiry,
            issuer: String::from("komik"),
            audience: String::from("komik-api"),
        })
    }

    /// Construct with an explicit secret, keeping the default lifetimes.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            session_token_expiry: 7 * 86_400,
            email_token_expiry: 3_600,
            issuer: String::from("komik"),
            audience: String::from("komik-api"),
        }
    }
}

/// CAPTCHA verification service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptchaConfig {
    /// Shared secret presented to the verification endpoint.
    pub secret: String,

    /// Verification endpoint URL.
    pub verify_url: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl CaptchaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret =
            std::env::var("CAPTCHA_SECRET").map_err(|_| ConfigError::missing("CAPTCHA_SECRET"))?;
        let verify_url = std::env::var("CAPTCHA_VERIFY_URL")
            .unwrap_or_else(|_| "https://www.google.com/recaptcha/api/siteverify".to_string());

        Ok(Self {
            secret,
            verify_url,
            request_timeout_secs: env_u64("CAPTCHA_TIMEOUT_SECS", 10),
        })
    }
}

/// Mail relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail relay HTTP endpoint.
    pub relay_url: String,

    /// API key for the relay.
    pub api_key: String,

    /// Sender address placed on outgoing mail.
    pub from_address: String,

    /// Base URL of the web client, used to build verification and reset links.
    pub client_url: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            relay_url: std::env::var("MAIL_RELAY_URL")
                .map_err(|_| ConfigError::missing("MAIL_RELAY_URL"))?,
            api_key: std::env::var("MAIL_API_KEY")
                .map_err(|_| ConfigError::missing("MAIL_API_KEY"))?,
            from_address: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@komik.app".to_string()),
            client_url: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            request_timeout_secs: env_u64("MAIL_TIMEOUT_SECS", 15),
        })
    }
}

/// Complete authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub captcha: CaptchaConfig,
    pub mail: MailConfig,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            captcha: CaptchaConfig::from_env()?,
            mail: MailConfig::from_env()?,
        })
    }
}

fn env_i64(var: &str, default: i64) -> i64 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
