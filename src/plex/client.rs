use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{EpisodeItem, MediaItem, MediaKind, PlexError, SeriesKey};

use super::MediaLibrary;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Plex `type` filter values for library searches
const PLEX_TYPE_MOVIE: u8 = 1;
const PLEX_TYPE_EPISODE: u8 = 4;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    container: T,
}

#[derive(Debug, Default, Deserialize)]
struct SectionList {
    #[serde(rename = "Directory", default)]
    directories: Vec<Directory>,
}

#[derive(Debug, Deserialize)]
struct Directory {
    key: String,
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataList {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<Metadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    title: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    grandparent_rating_key: Option<String>,
}

impl Metadata {
    fn into_item(self, fallback: MediaKind) -> MediaItem {
        let kind = self
            .kind
            .as_deref()
            .and_then(MediaKind::from_plex_type)
            .unwrap_or(fallback);
        MediaItem::new(self.title, self.year, kind)
    }

    fn into_episode(self) -> Option<EpisodeItem> {
        let key = self.grandparent_rating_key?;
        Some(EpisodeItem::new(self.title, self.year, key.as_str()))
    }
}

/// Thin client over the Plex HTTP API
pub struct PlexClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PlexClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, PlexError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, PlexError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Plex-Token", &self.token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlexError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.container)
    }

    /// Section key for a library title, e.g. "Movies" -> "1"
    pub async fn section_key(&self, library: &str) -> Result<String, PlexError> {
        let sections: SectionList = self.get("/library/sections", &[]).await?;
        find_section_key(&sections, library).ok_or_else(|| PlexError::LibraryNotFound(library.to_string()))
    }

    async fn recently_added(
        &self,
        library: &str,
        plex_type: u8,
        since: DateTime<Utc>,
    ) -> Result<Vec<Metadata>, PlexError> {
        let key = self.section_key(library).await?;
        let path = format!("/library/sections/{}/all", key);
        let query = [
            ("type", plex_type.to_string()),
            ("addedAt>>", since.timestamp().to_string()),
        ];
        let list: MetadataList = self.get(&path, &query).await?;
        tracing::info!(
            "Found {} item(s) added to {:?} since {}",
            list.metadata.len(),
            library,
            since
        );
        Ok(list.metadata)
    }
}

fn find_section_key(sections: &SectionList, library: &str) -> Option<String> {
    sections
        .directories
        .iter()
        .find(|dir| dir.title == library)
        .map(|dir| dir.key.clone())
}

#[async_trait]
impl MediaLibrary for PlexClient {
    async fn recent_movies(&self, library: &str, since: DateTime<Utc>) -> Result<Vec<MediaItem>, PlexError> {
        let items = self.recently_added(library, PLEX_TYPE_MOVIE, since).await?;
        Ok(items
            .into_iter()
            .map(|m| m.into_item(MediaKind::Movie))
            .collect())
    }

    async fn recent_episodes(&self, library: &str, since: DateTime<Utc>) -> Result<Vec<EpisodeItem>, PlexError> {
        let items = self.recently_added(library, PLEX_TYPE_EPISODE, since).await?;
        Ok(items
            .into_iter()
            .filter_map(|m| {
                let title = m.title.clone();
                let episode = m.into_episode();
                if episode.is_none() {
                    tracing::warn!("Episode {:?} has no parent series, skipping", title);
                }
                episode
            })
            .collect())
    }

    async fn resolve_series(&self, key: &SeriesKey) -> Result<MediaItem, PlexError> {
        let path = format!("/library/metadata/{}", key);
        let list: MetadataList = self.get(&path, &[]).await?;
        list.metadata
            .into_iter()
            .next()
            .map(|m| m.into_item(MediaKind::Show))
            .ok_or_else(|| PlexError::ItemNotFound(key.to_string()))
    }
}
