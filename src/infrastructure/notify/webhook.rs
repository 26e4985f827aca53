//! Webhook notifier backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use super::service::{LinkNotifier, NotifyError, NotifyResult};
use crate::domain::link_event::LinkEvent;

/// Longest response body excerpt kept in [`NotifyError::Status`].
const MAX_BODY_EXCERPT: usize = 512;

/// POSTs each event as JSON to a fixed URL.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Builds a notifier for `url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        let url = url.into();
        info!(url = %url, timeout_secs = timeout.as_secs(), "Webhook notifications enabled");

        Ok(Self { client, url })
    }
}

#[async_trait]
impl LinkNotifier for WebhookNotifier {
    async fn notify(&self, event: &LinkEvent) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_BODY_EXCERPT {
                let mut cut = MAX_BODY_EXCERPT;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(event = event.event.as_str(), link_id = event.id, "Webhook delivered");
        Ok(())
    }
}
