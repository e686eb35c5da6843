//! Link creation, redirect resolution and administration service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::validation::{
    generate_random_code, is_reserved_code, is_valid_code, normalize_url,
};
use serde_json::json;
use tracing::{debug, info};

/// Maximum number of random candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service for creating, resolving and managing short links.
///
/// Holds no state of its own: every operation is a bounded number of calls on
/// the repository, so instances can be freely shared between requests.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link for `target_url`.
    ///
    /// The URL is stored in its serialised form (see [`normalize_url`]), which
    /// is what redirects later send as `Location`.
    ///
    /// # Code Selection
    ///
    /// - If `custom_code` is provided and non-empty, it is validated and used
    ///   as-is, or rejected with a conflict if already taken
    /// - Otherwise random codes are generated, retrying up to
    ///   [`MAX_GENERATION_ATTEMPTS`] times on collision
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL or custom code is malformed.
    /// Returns [`AppError::CodeConflict`] if the custom code already exists,
    /// including when a concurrent request wins the insert.
    /// Returns [`AppError::CodeGenerationExhausted`] if every random code collided.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn create_link(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let Some(target_url) = normalize_url(&target_url) else {
            return Err(AppError::invalid_input(
                "Invalid URL format",
                json!({ "targetUrl": target_url }),
            ));
        };

        let code = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => {
                validate_custom_code(&custom)?;

                if self.link_repository.find_by_code(&custom).await?.is_some() {
                    return Err(AppError::code_conflict(
                        "Code already exists",
                        json!({ "code": custom }),
                    ));
                }

                custom
            }
            None => self.generate_unique_code().await?,
        };

        let link = self
            .link_repository
            .create(NewLink { code, target_url })
            .await?;

        info!(code = %link.code, target_url = %link.target_url, "Link created");

        Ok(link)
    }

    /// Resolves a short code to its target URL and records one click.
    ///
    /// The counter update is a single atomic statement in the store, so
    /// concurrent redirects never lose increments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn resolve_and_record_click(&self, code: &str) -> Result<String, AppError> {
        ensure_well_formed(code)?;

        let target_url = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        debug!(code, target_url = %target_url, "Click recorded");

        Ok(target_url)
    }

    /// Retrieves a link by its short code without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        ensure_well_formed(code)?;

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Lists all links, newest first, optionally filtered by a search term.
    ///
    /// A blank search term is treated as no filter.
    pub async fn list_links(&self, search: Option<String>) -> Result<Vec<Link>, AppError> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        self.link_repository.list(search).await
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code, which includes
    /// every repeated delete after a successful one.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        ensure_well_formed(code)?;

        if !self.link_repository.delete(code).await? {
            return Err(link_not_found(code));
        }

        info!(code, "Link deleted");

        Ok(())
    }

    /// Generates a code not currently present in the store.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_random_code();

            if is_reserved_code(&code) {
                continue;
            }

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            debug!(code = %code, attempt, "Generated code collided");
        }

        Err(AppError::code_generation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}

/// Checks a user-supplied short code.
fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::invalid_input(
            "Code must be 6-8 alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    if is_reserved_code(code) {
        return Err(AppError::invalid_input(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

/// A malformed code can never have been stored, so it is answered as not
/// found without a store round trip.
fn ensure_well_formed(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(link_not_found(code))
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
