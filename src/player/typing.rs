//! Typing-duration estimation.
//!
//! Pure mapping from message content to the simulated pause shown while the
//! sender "composes" the message. Speed scaling happens at the call site.

use crate::script::{Message, MessageContent};
use std::time::Duration;

const MS_PER_CHAR: u64 = 50;
const MIN_TYPING_MS: u64 = 500;
/// Fixed duration for messages with no text (e.g. image-only).
const NON_TEXT_TYPING_MS: u64 = 1000;

/// Estimate how long the sender would plausibly spend typing `message`.
/// Deterministic and strictly positive.
pub fn estimate_typing_duration(message: &Message) -> Duration {
    let text_len: usize = if message.content.is_empty() {
        message.text.chars().count()
    } else {
        message
            .content
            .iter()
            .map(|segment| match segment {
                MessageContent::Text { text } => text.chars().count(),
                MessageContent::Link { .. } | MessageContent::Image { .. } => 0,
            })
            .sum()
    };

    if text_len == 0 {
        return Duration::from_millis(NON_TEXT_TYPING_MS);
    }
    Duration::from_millis((text_len as u64 * MS_PER_CHAR).max(MIN_TYPING_MS))
}
