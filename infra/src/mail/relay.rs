//! HTTP mail relay dispatcher.
//!
//! Delivers messages by POSTing JSON to a relay endpoint authenticated
//! with an API key. A non-success status or transport failure propagates
//! as an upstream error; the orchestrators treat that as a failed
//! login/signup attempt.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use komik_core::errors::{DomainError, DomainResult};
use komik_core::services::mail::{MailDispatcher, SentMail};
use komik_shared::config::MailConfig;
use komik_shared::utils::email::mask_email;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Dispatcher POSTing rendered messages to an HTTP mail relay.
pub struct HttpMailDispatcher {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailDispatcher {
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MailDispatcher for HttpMailDispatcher {
    async fn send(&self, mail: SentMail) -> DomainResult<()> {
        let payload = RelayPayload {
            from: &self.config.from_address,
            to: &mail.to,
            subject: &mail.subject,
            html: &mail.body,
        };

        let response = self
            .client
            .post(&self.config.relay_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("mail relay request failed: {e}");
                DomainError::upstream("mail", e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "mail relay rejected the message");
            return Err(DomainError::upstream(
                "mail",
                format!("relay returned status {status}"),
            ));
        }

        debug!(to = %mask_email(&mail.to), "mail dispatched");
        Ok(())
    }
}
