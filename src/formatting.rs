// src/formatting.rs

use crate::core::Event;

/// A trait for rendering an event into a destination's outbound text.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, event: &Event) -> String;
}

/// Renders events in Telegram markup: a glyph-and-severity header, an
/// optional metadata block, then the raw message.
pub struct TelegramTextFormatter;

impl MessageFormatter for TelegramTextFormatter {
    fn format(&self, event: &Event) -> String {
        let timestamp = event.occurred_at.format("%d.%m.%Y %H.%M.%S");
        let mut formatted = format!(
            "{} [{}] {}",
            event.severity.glyph(),
            event.severity.label(),
            timestamp
        );

        if !event.metadata.is_empty() {
            formatted.push_str("\n\n*METADATA*");
            for (key, value) in event.metadata.iter() {
                formatted.push_str(&format!("\n*{}*: {}", key, value));
            }
            formatted.push('\n');
        }

        formatted.push('\n');
        formatted.push_str(&event.message);

        formatted
    }
}
