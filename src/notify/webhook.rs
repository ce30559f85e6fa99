use async_trait::async_trait;
use serenity::builder::{CreateEmbed, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::webhook::Webhook;

use crate::models::{DeliveryError, OutboundMessage, OutboundSection};

use super::MessageSink;

/// Build the embed for one section
pub fn build_embed(section: &OutboundSection) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&section.section.title_line)
        .description(&section.section.body_text)
        .color(section.colour);

    if let Some(ref thumbnail) = section.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    embed
}

/// Header text as content plus one embed per section, in order
pub fn build_webhook_message(message: &OutboundMessage) -> ExecuteWebhook {
    let embeds = message.sections.iter().map(build_embed).collect::<Vec<_>>();
    ExecuteWebhook::new()
        .content(&message.header_text)
        .embeds(embeds)
}

/// Posts messages to a Discord channel webhook. One attempt per message.
pub struct DiscordWebhook {
    http: Http,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: &str) -> Self {
        // Webhook execution is authorized by the token in the URL, not a bot token
        Self {
            http: Http::new(""),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl MessageSink for DiscordWebhook {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let webhook = Webhook::from_url(&self.http, &self.url).await?;

        match webhook
            .execute(&self.http, true, build_webhook_message(message))
            .await?
        {
            Some(sent) => tracing::info!("Sent digest message {}", sent.id),
            None => tracing::info!("Sent digest message"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, SectionKind};

    fn outbound(thumbnail: Option<&str>) -> OutboundSection {
        OutboundSection {
            section: Section::new(
                SectionKind::Movies,
                "2 Movies 🎬".to_string(),
                "• Dune (2021)\n• Arrival (2016)".to_string(),
            ),
            colour: 0xE5A00D,
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    #[test]
    fn embed_carries_section_fields() {
        let json = serde_json::to_value(build_embed(&outbound(None))).unwrap();
        assert_eq!(json["title"], "2 Movies 🎬");
        assert_eq!(json["description"], "• Dune (2021)\n• Arrival (2016)");
        assert_eq!(json["color"], 0xE5A00D);
    }

    #[test]
    fn embed_thumbnail_is_optional() {
        let json = serde_json::to_value(build_embed(&outbound(Some("https://example.com/t.png")))).unwrap();
        assert_eq!(json["thumbnail"]["url"], "https://example.com/t.png");
    }

    #[test]
    fn message_has_header_and_all_embeds() {
        let message = OutboundMessage {
            header_text: "_ _\n**New media added in the past day:**".to_string(),
            sections: vec![outbound(None), outbound(None)],
        };
        let json = serde_json::to_value(build_webhook_message(&message)).unwrap();
        assert_eq!(json["content"], "_ _\n**New media added in the past day:**");
        assert_eq!(json["embeds"].as_array().map(Vec::len), Some(2));
    }
}
