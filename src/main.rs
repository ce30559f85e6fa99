use std::time::Instant;

use tracing_subscriber::EnvFilter;

use plexdigest::config::{Config, config_path};
use plexdigest::notify::{DiscordWebhook, ping_uptime};
use plexdigest::plex::PlexClient;
use plexdigest::run::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    // Load .env file if present (may carry RUST_LOG)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = config_path();
    let config = Config::load(&path)?;
    tracing::info!("Loaded config from {:?}", path);
    if config.updates.testing_mode {
        tracing::info!("Testing mode enabled, using the testing webhook");
    }

    let plex = PlexClient::new(&config.plex.url, &config.plex.token)?;
    let webhook = DiscordWebhook::new(config.webhook_url()?);

    let outcome = run(&config, &plex, &webhook, chrono::Utc::now()).await?;
    tracing::info!("Run finished: {:?}", outcome);

    if let Some(url) = config.uptime_url() {
        let client = reqwest::Client::new();
        ping_uptime(&client, url, start.elapsed().as_secs()).await;
    }

    Ok(())
}
