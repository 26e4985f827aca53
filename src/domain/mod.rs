//! Domain layer: entities, ordering rules, events and repository contracts.
//!
//! Nothing here depends on HTTP or on a concrete database.
//!
//! - [`entities`] - link data structures
//! - [`ordering`] - default position and reorder permutation rules
//! - [`link_event`] - mutation events for the notification sink
//! - [`repositories`] - data access traits implemented in
//!   [`crate::infrastructure::persistence`]

pub mod entities;
pub mod link_event;
pub mod ordering;
pub mod repositories;
