//! PostgreSQL persistence.
//!
//! - [`PgLinkRepository`] - link storage and retrieval
//! - [`migrations`] - embedded schema revisions, baselining and upgrade

pub mod migrations;
pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
