pub mod compose;
pub mod config;
pub mod models;
pub mod notify;
pub mod plex;
pub mod run;
