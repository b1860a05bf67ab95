//! Mailers that stand in for the Resend relay.

use async_trait::async_trait;
use folio::mail::{MailError, Mailer, OutgoingMail};
use parking_lot::Mutex;

/// Accepts every message and keeps a copy.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError> {
        let mut sent = self.sent.lock();
        sent.push(mail.clone());
        Ok(format!("mock-{}", sent.len()))
    }
}

/// Rejects every message as the relay would on an outage.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<String, MailError> {
        Err(MailError::Api {
            status: 503,
            body: "relay unavailable".to_string(),
        })
    }
}
