use std::path::PathBuf;

use thiserror::Error;

/// Problems loading or validating configuration. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid lookback period {0:?}: expected a number followed by m, h, d or w")]
    InvalidLookback(String),

    #[error("Testing mode is enabled but no testing webhook is configured")]
    MissingTestingWebhook,

    #[error("Message length budget must be greater than zero")]
    ZeroBudget,

    #[error("Message length budget {budget} exceeds Discord's limit of {limit} characters")]
    BudgetTooLarge { budget: usize, limit: usize },
}

/// Errors talking to the Plex server
#[derive(Error, Debug)]
pub enum PlexError {
    #[error("Plex request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Plex responded with {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Library section not found: {0}")]
    LibraryNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),
}

/// Errors sending the message. Logged, never propagated out of a run.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plex error: {0}")]
    Plex(#[from] PlexError),
}
