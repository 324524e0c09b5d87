//! reCAPTCHA verification client.
//!
//! Form-encoded POST to the verification endpoint; the response is JSON
//! with `success: bool` and optional `error-codes`. A transport failure is
//! an upstream error, never a rejection verdict, so an outage cannot be
//! mistaken for a failed challenge.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use komik_core::errors::{DomainError, DomainResult};
use komik_core::services::captcha::{CaptchaVerdict, CaptchaVerifier};
use komik_shared::config::CaptchaConfig;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// HTTP client for the reCAPTCHA verification endpoint.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    config: CaptchaConfig,
}

impl RecaptchaVerifier {
    pub fn new(config: CaptchaConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> DomainResult<CaptchaVerdict> {
        let response = self
            .client
            .post(&self.config.verify_url)
            .form(&[
                ("secret", self.config.secret.as_str()),
                ("response", token),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("captcha verification request failed: {e}");
                DomainError::upstream("captcha", e.to_string())
            })?;

        let body: VerifyResponse = response.json().await.map_err(|e| {
            error!("captcha verification response unreadable: {e}");
            DomainError::upstream("captcha", e.to_string())
        })?;

        debug!(success = body.success, "captcha verdict received");
        if body.success {
            Ok(CaptchaVerdict::accepted())
        } else {
            Ok(CaptchaVerdict::rejected(body.error_codes))
        }
    }
}
