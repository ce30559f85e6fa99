use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::compose::{aggregate, compose_message, distinct_series_keys};
use crate::config::Config;
use crate::models::{MediaItem, NotifierError, SeriesCount};
use crate::notify::MessageSink;
use crate::plex::MediaLibrary;

/// How a run ended when nothing fatal happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Delivered,
    NothingToSend,
    DeliveryFailed,
}

/// Fetch, compose and deliver one digest covering the lookback window ending at `now`.
///
/// Config and Plex errors abort the run. A failed delivery is logged and reported
/// as [`RunOutcome::DeliveryFailed`].
pub async fn run<L, S>(
    config: &Config,
    library: &L,
    sink: &S,
    now: DateTime<Utc>,
) -> Result<RunOutcome, NotifierError>
where
    L: MediaLibrary + ?Sized,
    S: MessageSink + ?Sized,
{
    let since = config.lookback().cutoff(now);
    let skip = &config.updates.skip_libraries;

    let movies: Vec<MediaItem> = if skip.movies {
        tracing::info!("Skipping movie library");
        Vec::new()
    } else {
        library.recent_movies(&config.plex.libraries.movies, since).await?
    };

    let shows: Vec<SeriesCount> = if skip.shows {
        tracing::info!("Skipping show library");
        Vec::new()
    } else {
        let episodes = library.recent_episodes(&config.plex.libraries.shows, since).await?;

        let mut resolved = HashMap::new();
        for key in distinct_series_keys(&episodes) {
            let series = library.resolve_series(&key).await?;
            resolved.insert(key, series);
        }
        aggregate(&episodes, |key| resolved.get(key).cloned())
    };

    tracing::info!(
        "{} new movie(s), {} show(s) with new episodes",
        movies.len(),
        shows.len()
    );

    let options = config.compose_options();
    let Some(message) = compose_message(&options, &config.header_text(), &movies, &shows) else {
        tracing::info!("No new/specified media to notify about - message not sent.");
        return Ok(RunOutcome::NothingToSend);
    };

    match sink.deliver(&message).await {
        Ok(()) => Ok(RunOutcome::Delivered),
        Err(e) => {
            tracing::error!("There was an error sending the message: {}", e);
            Ok(RunOutcome::DeliveryFailed)
        }
    }
}
