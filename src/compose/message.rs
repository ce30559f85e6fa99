use crate::models::{OutboundMessage, OutboundSection, Section, SectionKind};

/// Per-section presentation taken from the embed options
#[derive(Debug, Clone)]
pub struct EmbedStyle {
    pub movies_colour: u32,
    pub shows_colour: u32,
    pub thumbnail: Option<String>,
}

impl Default for EmbedStyle {
    fn default() -> Self {
        Self {
            movies_colour: 0xE5A00D,
            shows_colour: 0xE5A00D,
            thumbnail: None,
        }
    }
}

impl EmbedStyle {
    fn colour_for(&self, kind: SectionKind) -> u32 {
        match kind {
            SectionKind::Movies => self.movies_colour,
            SectionKind::Shows => self.shows_colour,
        }
    }
}

/// Build the outgoing message. Returns `None` when there is nothing to send.
pub fn assemble(header: &str, sections: Vec<Section>, style: &EmbedStyle) -> Option<OutboundMessage> {
    if sections.is_empty() {
        return None;
    }

    let sections = sections
        .into_iter()
        .map(|section| OutboundSection {
            colour: style.colour_for(section.kind),
            thumbnail: style.thumbnail.clone(),
            section,
        })
        .collect();

    Some(OutboundMessage {
        header_text: header.to_string(),
        sections,
    })
}
