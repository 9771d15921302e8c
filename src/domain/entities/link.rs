//! View-models for created links and their statistics.
//!
//! Both types are transient: built per operation call and dropped when the
//! next call supersedes them. Nothing here is cached.

use chrono::{DateTime, Utc};

use super::ShortCodeRef;

/// Outcome of a successful shorten operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_code: ShortCodeRef,
    pub original_url: String,
}

impl ShortenResult {
    pub fn new(short_code: ShortCodeRef, original_url: String) -> Self {
        Self {
            short_code,
            original_url,
        }
    }

    /// Public short link for this code under `origin`.
    pub fn short_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.short_code)
    }
}

/// Read-only snapshot of a link's usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResult {
    pub short_code: ShortCodeRef,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
}

impl StatsResult {
    pub fn new(short_code: ShortCodeRef, click_count: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            click_count,
            created_at,
        }
    }
}
