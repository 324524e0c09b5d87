//! Outbound mail seam for OTP codes, verification links and reset links.
//!
//! Dispatch happens BEFORE the corresponding account state is persisted:
//! if the relay fails, the login/reset attempt fails and no half-issued
//! challenge is left on the record.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::DomainResult;

/// A rendered outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail delivery seam.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Deliver one message. Relay failures surface as
    /// `DomainError::Upstream`.
    async fn send(&self, mail: SentMail) -> DomainResult<()>;
}

/// Dispatcher that records messages in memory. Tests use it to assert on
/// what was sent and in what order.
#[derive(Default)]
pub struct RecordingMailDispatcher {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }

    pub async fn last(&self) -> Option<SentMail> {
        self.sent.lock().await.last().cloned()
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailDispatcher {
    async fn send(&self, mail: SentMail) -> DomainResult<()> {
        self.sent.lock().await.push(mail);
        Ok(())
    }
}

/// Dispatcher that always fails, for exercising upstream-outage paths.
pub struct FailingMailDispatcher;

#[async_trait]
impl MailDispatcher for FailingMailDispatcher {
    async fn send(&self, _mail: SentMail) -> DomainResult<()> {
        Err(crate::errors::DomainError::upstream(
            "mail",
            "relay unavailable",
        ))
    }
}
