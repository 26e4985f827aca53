//! Outbound notifications for link mutations.
//!
//! Provides a [`LinkNotifier`] trait with two implementations:
//! - [`WebhookNotifier`] - POSTs the event as JSON to a configured URL
//! - [`NullNotifier`] - No-op used when no webhook is configured
//!
//! Events reach a notifier through [`run_notification_worker`], which runs
//! detached from request handling.

mod null_notifier;
mod service;
mod webhook;
mod worker;

pub use null_notifier::NullNotifier;
pub use service::{LinkNotifier, NotifyError, NotifyResult};
pub use webhook::WebhookNotifier;
pub use worker::run_notification_worker;

#[cfg(test)]
pub use service::MockLinkNotifier;
