mod error;
mod media;

pub use error::{ConfigError, DeliveryError, NotifierError, PlexError};
pub use media::{
    EpisodeItem, MediaItem, MediaKind, OutboundMessage, OutboundSection, SeriesCount, SeriesKey,
    Section, SectionKind,
};
