//! Core domain entities.
//!
//! - [`Link`] - a stored link
//! - [`LinkDraft`] - unvalidated client input
//! - [`NewLink`] - validated input for creation
//! - [`LinkReplacement`] - input for a full-replace update

pub mod link;

pub use link::{Link, LinkDraft, LinkReplacement, NewLink};
