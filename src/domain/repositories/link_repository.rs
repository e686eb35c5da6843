//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for short links.
///
/// The store owns every piece of shared state. Implementations must make
/// [`LinkRepository::record_click`] a single atomic relative update and must
/// enforce uniqueness of `code` themselves.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code already exists.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Increments `clicks` and sets `last_clicked = now` in one atomic update.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target_url))` if the link exists
    /// - `Ok(None)` if no link has this code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Lists links newest first.
    ///
    /// When `search` is set, only links whose code or target URL contains it
    /// (case-insensitively) are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list(&self, search: Option<String>) -> Result<Vec<Link>, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
