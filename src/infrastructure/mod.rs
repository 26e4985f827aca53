//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`notify`] - Webhook notifications (HTTP and no-op implementations)
//! - [`persistence`] - PostgreSQL repository and schema migrations

pub mod notify;
pub mod persistence;
