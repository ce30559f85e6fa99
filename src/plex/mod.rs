mod client;

pub use client::PlexClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{EpisodeItem, MediaItem, PlexError, SeriesKey};

/// Source of recently added library items
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Movies added to `library` at or after `since`
    async fn recent_movies(&self, library: &str, since: DateTime<Utc>) -> Result<Vec<MediaItem>, PlexError>;

    /// Episodes added to `library` at or after `since`
    async fn recent_episodes(&self, library: &str, since: DateTime<Utc>) -> Result<Vec<EpisodeItem>, PlexError>;

    /// Look up the series an episode belongs to
    async fn resolve_series(&self, key: &SeriesKey) -> Result<MediaItem, PlexError>;
}
