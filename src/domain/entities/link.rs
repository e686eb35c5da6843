//! Link entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to its target URL.
///
/// `code` is the primary key and never changes. `clicks` and `last_clicked`
/// are only ever advanced together by a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        target_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            target_url,
            clicks,
            created_at,
            last_clicked,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }

    /// Builds the public short URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}
