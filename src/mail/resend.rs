//! Resend HTTP API client.

use crate::mail::{MailError, Mailer, OutgoingMail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    #[serde(flatten)]
    mail: &'a OutgoingMail,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Posts messages to `{api_base}/emails` with a bearer API key.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
    api_base: String,
}

impl ResendMailer {
    pub fn new(
        api_key: String,
        from: String,
        api_base: String,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            from,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    #[inline]
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError> {
        let resp = self
            .client
            .post(self.url("/emails"))
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                mail,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Api { status, body });
        }

        let sent: SendEmailResponse = resp.json().await?;
        Ok(sent.id)
    }
}

/// Used when no API key is configured.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<String, MailError> {
        Err(MailError::NotConfigured)
    }
}
