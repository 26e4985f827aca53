//! No-op notifier for deployments without a webhook.

use async_trait::async_trait;
use tracing::debug;

use super::service::{LinkNotifier, NotifyResult};
use crate::domain::link_event::LinkEvent;

/// A notifier that drops every event.
pub struct NullNotifier;

impl NullNotifier {
    /// Creates a new NullNotifier instance.
    pub fn new() -> Self {
        debug!("Using NullNotifier (webhook disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkNotifier for NullNotifier {
    async fn notify(&self, _event: &LinkEvent) -> NotifyResult<()> {
        Ok(())
    }
}
