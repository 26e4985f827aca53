use std::sync::Arc;
use tokio::sync::mpsc;

use super::service::LinkNotifier;
use crate::domain::link_event::LinkEvent;

/// Drains the notification queue until every sender is dropped.
///
/// Each event gets exactly one delivery attempt. Failures are logged and
/// swallowed so a broken webhook never stalls the queue.
pub async fn run_notification_worker(
    mut rx: mpsc::Receiver<LinkEvent>,
    notifier: Arc<dyn LinkNotifier>,
) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = notifier.notify(&event).await {
            tracing::warn!(
                error = %e,
                event = event.event.as_str(),
                link_id = event.id,
                "Link notification failed"
            );
        }
    }

    tracing::debug!("Notification worker stopped");
}
