//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;
use crate::utils::validation::{is_valid_code, is_valid_url};

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The absolute URL to redirect to.
    #[validate(custom(function = "validate_target_url"))]
    pub target_url: String,

    /// Optional custom short code. Empty means "generate one".
    #[validate(custom(function = "validate_code"))]
    pub code: Option<String>,
}

/// Query parameters for listing links.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Case-insensitive substring matched against code and target URL.
    pub q: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
    pub short_url: String,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = link.short_url(base_url);

        Self {
            code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
            short_url,
        }
    }
}

fn validate_target_url(url: &str) -> Result<(), ValidationError> {
    if is_valid_url(url) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::Borrowed("Invalid URL format")))
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || is_valid_code(code) {
        Ok(())
    } else {
        Err(ValidationError::new("code")
            .with_message(Cow::Borrowed("Code must be 6-8 alphanumeric characters")))
    }
}
