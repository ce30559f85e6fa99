use crate::models::{MediaItem, Section, SectionKind, SeriesCount};

use super::title::normalize_title;

/// Formatting options shared by both sections
#[derive(Debug, Clone)]
pub struct SectionStyle {
    pub bullet: String,
    pub movies_emote: String,
    pub shows_emote: String,
    pub show_episode_count_per_show: bool,
    pub show_total_episode_count: bool,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
            movies_emote: "🎬".to_string(),
            shows_emote: "📺".to_string(),
            show_episode_count_per_show: true,
            show_total_episode_count: true,
        }
    }
}

fn plural(word: &str, pluralize: bool) -> String {
    if pluralize {
        format!("{}s", word)
    } else {
        word.to_string()
    }
}

/// One bulleted line per movie, duplicates included, in the order received.
pub fn format_movies(movies: &[MediaItem], style: &SectionStyle) -> Section {
    let body = movies
        .iter()
        .map(|movie| format!("{} {}", style.bullet, normalize_title(&movie.title, movie.year)))
        .collect::<Vec<_>>()
        .join("\n");

    let count = movies.len();
    let title = format!(
        "{} {} {}",
        count,
        plural("Movie", count != 1),
        style.movies_emote
    );

    Section::new(SectionKind::Movies, title, body)
}

/// One bulleted line per series, keeping the order produced by aggregation.
///
/// "Show" is pluralized for several shows, and also for a single show that got
/// more than one episode.
pub fn format_shows(series: &[SeriesCount], style: &SectionStyle) -> Section {
    let body = series
        .iter()
        .map(|s| {
            if style.show_episode_count_per_show {
                format!(
                    "{} {} - *{} {}*",
                    style.bullet,
                    s.display_title,
                    s.episode_count,
                    plural("episode", s.episode_count > 1)
                )
            } else {
                format!("{} {}", style.bullet, s.display_title)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let show_count = series.len();
    let episode_total: usize = series.iter().map(|s| s.episode_count).sum();
    let shows_plural = match series {
        [only] => only.episode_count > 1,
        _ => show_count > 1,
    };

    let title = if style.show_total_episode_count {
        format!(
            "{} {} / {} {} {}",
            show_count,
            plural("Show", shows_plural),
            episode_total,
            // Follows the total, unlike "Show": one show with 4 episodes reads "4 Episodes"
            plural("Episode", episode_total != 1),
            style.shows_emote
        )
    } else {
        format!(
            "{} {} {}",
            show_count,
            plural("Show", shows_plural),
            style.shows_emote
        )
    };

    Section::new(SectionKind::Shows, title, body)
}
