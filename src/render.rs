//! Plain-text rendering of messages for the terminal front end.

use crate::script::{Message, MessageContent, Sender};

/// One transcript line for a revealed message.
pub fn format_message(message: &Message) -> String {
    format!("[{}] {}", message.sender.label(), message_body(message))
}

/// The textual body: rich segments when present, primary text otherwise.
fn message_body(message: &Message) -> String {
    if message.content.is_empty() {
        return message.text.clone();
    }
    message
        .content
        .iter()
        .map(format_segment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_segment(segment: &MessageContent) -> String {
    match segment {
        MessageContent::Text { text } => text.clone(),
        MessageContent::Link { text, url } => format!("{text} ({url})"),
        MessageContent::Image { url, alt } => match alt {
            Some(alt) => format!("[image: {alt}]"),
            None => format!("[image: {url}]"),
        },
    }
}

/// Indicator line shown while a party is "typing".
pub fn format_typing(sender: Sender) -> String {
    format!("... {} is typing", sender.label())
}

/// The full conversation as newline-separated transcript lines.
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join("\n")
}
