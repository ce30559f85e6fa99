use std::fmt;

/// Kind of library item as reported by the media server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Episode,
    Show,
}

impl MediaKind {
    /// Map the server's `type` string to a kind
    pub fn from_plex_type(kind: &str) -> Option<Self> {
        match kind {
            "movie" => Some(MediaKind::Movie),
            "episode" => Some(MediaKind::Episode),
            "show" => Some(MediaKind::Show),
            _ => None,
        }
    }
}

/// A single library item (movie, episode or series)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub title: String,
    pub year: Option<i32>, // Some servers omit the year for unmatched items
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, year: Option<i32>, kind: MediaKind) -> Self {
        Self {
            title: title.into(),
            year,
            kind,
        }
    }

    pub fn movie(title: impl Into<String>, year: i32) -> Self {
        Self::new(title, Some(year), MediaKind::Movie)
    }

    pub fn show(title: impl Into<String>, year: i32) -> Self {
        Self::new(title, Some(year), MediaKind::Show)
    }
}

/// Opaque key identifying an episode's parent series on the server
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey(pub String);

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesKey {
    fn from(key: &str) -> Self {
        SeriesKey(key.to_string())
    }
}

/// An episode together with the key of the series it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    pub item: MediaItem,
    pub series_key: SeriesKey,
}

impl EpisodeItem {
    pub fn new(title: impl Into<String>, year: Option<i32>, series_key: impl Into<SeriesKey>) -> Self {
        Self {
            item: MediaItem::new(title, year, MediaKind::Episode),
            series_key: series_key.into(),
        }
    }
}

/// Number of new episodes for one series within the lookback window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesCount {
    pub display_title: String,
    pub episode_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Movies,
    Shows,
}

/// One formatted block of the outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub title_line: String,
    pub body_text: String,
    pub raw_length: usize, // Characters in body_text before truncation
}

impl Section {
    pub fn new(kind: SectionKind, title_line: String, body_text: String) -> Self {
        let raw_length = body_text.chars().count();
        Self {
            kind,
            title_line,
            body_text,
            raw_length,
        }
    }
}

/// A section plus the presentation it is delivered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSection {
    pub section: Section,
    pub colour: u32,
    pub thumbnail: Option<String>,
}

/// Final message handed to the delivery sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub header_text: String,
    pub sections: Vec<OutboundSection>,
}
