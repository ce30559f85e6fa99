//! Turns lists of newly added items into a length-bounded Discord message.

pub mod budget;
pub mod episodes;
pub mod message;
pub mod section;
pub mod title;

pub use budget::{DISCORD_MESSAGE_LIMIT, MESSAGE_MAX_LENGTH, allocate, overflow_notice, truncate_on_newline};
pub use episodes::{aggregate, distinct_series_keys};
pub use message::{EmbedStyle, assemble};
pub use section::{SectionStyle, format_movies, format_shows};
pub use title::normalize_title;

use crate::models::{MediaItem, OutboundMessage, SeriesCount};

/// Everything the composer needs, built once from the loaded configuration
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub style: SectionStyle,
    pub embed: EmbedStyle,
    /// Already rendered with [`overflow_notice`]
    pub overflow_notice: String,
    pub message_budget: usize,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            style: SectionStyle::default(),
            embed: EmbedStyle::default(),
            overflow_notice: overflow_notice("Too many new items to list them all"),
            message_budget: MESSAGE_MAX_LENGTH,
        }
    }
}

/// Format, budget and assemble the message for one run.
///
/// Empty inputs skip their section. Returns `None` when both are empty.
pub fn compose_message(
    options: &ComposeOptions,
    header: &str,
    movies: &[MediaItem],
    shows: &[SeriesCount],
) -> Option<OutboundMessage> {
    let mut sections = Vec::new();
    if !movies.is_empty() {
        sections.push(format_movies(movies, &options.style));
    }
    if !shows.is_empty() {
        sections.push(format_shows(shows, &options.style));
    }
    if sections.is_empty() {
        return None;
    }

    let raw_lengths: Vec<usize> = sections.iter().map(|s| s.raw_length).collect();
    let allowances = allocate(&raw_lengths, options.message_budget);

    for (section, allowed) in sections.iter_mut().zip(allowances) {
        // Only cut sections that overflow; the notice marks real truncation
        if section.raw_length > allowed {
            tracing::info!(
                "Trimming {:?} section from {} to at most {} chars",
                section.kind,
                section.raw_length,
                allowed
            );
            section.body_text = truncate_on_newline(&section.body_text, allowed, &options.overflow_notice);
        }
    }

    assemble(header, sections, &options.embed)
}
