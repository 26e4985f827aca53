//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkReplacement, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `links` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns every link ordered by `ordem`, then `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i32) -> Result<Option<Link>, AppError>;

    /// Returns `MAX(ordem)`, or `None` when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn max_ordem(&self) -> Result<Option<i32>, AppError>;

    /// Inserts a link and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Overwrites the editable fields of a link.
    ///
    /// Returns `Ok(None)` if no link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn replace(&self, id: i32, replacement: LinkReplacement)
    -> Result<Option<Link>, AppError>;

    /// Physically deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Sets `ordem` to the 1-based position of each id, in one transaction.
    ///
    /// The stored ids are read under a table lock that blocks concurrent
    /// inserts and deletes, and `ordered_ids` must be a permutation of them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with `missing`, `unknown` and
    /// `duplicates` details when the ids do not match, and
    /// [`AppError::Internal`] on database errors. Nothing is written then.
    async fn reorder(&self, ordered_ids: Vec<i32>) -> Result<(), AppError>;

    /// Connectivity check used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
