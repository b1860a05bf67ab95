//! Outbound mail.
//!
//! A contact submission notifies the site owner and a new account receives a
//! welcome message. Both go through the [`Mailer`] trait; the production
//! implementation is [`ResendMailer`]. Delivery is best effort: callers use
//! [`deliver`], which logs the outcome and never fails the request.

pub mod resend;
pub mod templates;

pub use resend::{DisabledMailer, ResendMailer};

use crate::utils::toml_config::FolioConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Errors from the mail relay. Never surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail is not configured")]
    NotConfigured,

    #[error("mail request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// A single message ready for delivery. The sender address belongs to the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sends mail. Returns the provider's message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError>;
}

/// Builds the mailer described by `[mail]`: Resend when an API key is set,
/// otherwise a mailer that refuses every send.
pub fn from_config(config: &FolioConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.mail_api_key() {
        Some(api_key) => Ok(Arc::new(ResendMailer::new(
            api_key,
            config.mail.from.clone(),
            config.mail.api_base.clone(),
            std::time::Duration::from_secs(config.mail.timeout_secs),
        )?)),
        None => Ok(Arc::new(DisabledMailer)),
    }
}

/// Sends `mail` and logs the outcome. Failures are swallowed.
pub async fn deliver(mailer: &dyn Mailer, mail: OutgoingMail) -> bool {
    match mailer.send(&mail).await {
        Ok(id) => {
            info!(id = %id, subject = %mail.subject, "Mail sent");
            true
        }
        Err(e) => {
            warn!(error = %e, subject = %mail.subject, "Mail not sent");
            false
        }
    }
}
