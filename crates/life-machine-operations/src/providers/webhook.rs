use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use crate::NotifyError;
use crate::traits::Notifier;

pub const WEBHOOK_USERNAME: &str = "Life Machine";
pub const WEBHOOK_AVATAR_URL: &str = "https://i.imgur.com/FuVPVzi.jpeg";

/// Discord-compatible webhook payload.
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub content: &'a str,
    pub username: &'a str,
    pub avatar_url: &'a str,
}

impl<'a> WebhookMessage<'a> {
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            username: WEBHOOK_USERNAME,
            avatar_url: WEBHOOK_AVATAR_URL,
        }
    }
}

pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    /// An empty URL is treated the same as no URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Option<String>) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .user_agent(concat!("life-machine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            url: url.filter(|u| !u.trim().is_empty()),
        })
    }
}

impl Notifier for WebhookNotifier {
    fn has_destination(&self) -> bool {
        self.url.is_some()
    }

    fn send(&self, content: &str) -> Result<(), NotifyError> {
        let Some(url) = &self.url else {
            return Err(NotifyError::MissingWebhook);
        };

        debug!(length = content.len(), "posting webhook message");

        let response = self
            .client
            .post(url)
            .json(&WebhookMessage::new(content))
            .send()
            .map_err(NotifyError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
