//! Notifier trait and error types.

use async_trait::async_trait;

use crate::domain::link_event::LinkEvent;

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Transport(String),

    #[error("webhook responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type for notifier operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Delivers [`LinkEvent`]s to an external system.
///
/// Delivery is best effort. Callers log errors and move on; nothing is retried.
///
/// # Implementations
///
/// - [`crate::infrastructure::notify::WebhookNotifier`]
/// - [`crate::infrastructure::notify::NullNotifier`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkNotifier: Send + Sync {
    /// Delivers a single event.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] on transport failure, timeout or a non-2xx response.
    async fn notify(&self, event: &LinkEvent) -> NotifyResult<()>;
}
