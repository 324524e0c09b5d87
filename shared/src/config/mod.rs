//! Configuration modules loaded from the environment at startup.

pub mod auth;
pub mod database;
pub mod server;

pub use auth::{AuthConfig, CaptchaConfig, JwtConfig, MailConfig};
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Error raised while assembling configuration from the environment.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shorthand for a missing required environment variable.
    pub fn missing(var: &str) -> Self {
        Self::new(format!("required environment variable {var} is not set"))
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
