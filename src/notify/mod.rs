mod uptime;
mod webhook;

pub use uptime::{ping_uptime, uptime_target};
pub use webhook::{DiscordWebhook, build_embed, build_webhook_message};

use async_trait::async_trait;

use crate::models::{DeliveryError, OutboundMessage};

/// Destination for the composed message
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}
