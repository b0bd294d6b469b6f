//! Script data model: messages, rich content segments, and editing operations.
//!
//! A script is the ordered list of messages a conversation plays through, plus
//! a display title. Scripts are edited in place (add/update/delete/reorder)
//! and exchanged as JSON documents; the player only ever reads snapshots.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

fn next_message_id() -> u64 {
    NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)
}

/// One of the two fixed conversation participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Party1,
    Party2,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Party1 => "party1",
            Self::Party2 => "party2",
        }
    }
}

/// A typed segment of rich message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        text: String,
    },
    Link {
        text: String,
        url: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
}

/// A single scripted message. Immutable once scheduled for playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Stable identifier, unique within a script.
    pub id: u64,
    pub sender: Sender,
    /// Primary text, used when `content` is empty.
    pub text: String,
    /// Optional rich segments; an empty list means a plain text message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<MessageContent>,
    /// Delay in milliseconds from the moment this message becomes current
    /// until it is revealed (before any typing phase).
    pub delay_ms: u64,
}

/// Partial update for [`Script::update_message`]. The id is immutable.
#[derive(Debug, Clone, Default)]
pub struct MessagePatch {
    pub sender: Option<Sender>,
    pub text: Option<String>,
    pub content: Option<Vec<MessageContent>>,
    pub delay_ms: Option<u64>,
}

/// An ordered message sequence with a display title. Order is playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

fn default_title() -> String {
    "New Conversation".into()
}

impl Default for Script {
    fn default() -> Self {
        Self {
            title: default_title(),
            messages: Vec::new(),
        }
    }
}

impl Script {
    /// Append a message and return its freshly assigned id.
    pub fn add_message(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        content: Vec<MessageContent>,
        delay_ms: u64,
    ) -> u64 {
        let id = next_message_id();
        self.messages.push(Message {
            id,
            sender,
            text: text.into(),
            content,
            delay_ms,
        });
        id
    }

    /// Apply a partial update to the message with the given id.
    pub fn update_message(&mut self, id: u64, patch: MessagePatch) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(Error::MessageNotFound(id))?;
        if let Some(sender) = patch.sender {
            message.sender = sender;
        }
        if let Some(text) = patch.text {
            message.text = text;
        }
        if let Some(content) = patch.content {
            message.content = content;
        }
        if let Some(delay_ms) = patch.delay_ms {
            message.delay_ms = delay_ms;
        }
        Ok(())
    }

    pub fn delete_message(&mut self, id: u64) -> Result<()> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(Error::MessageNotFound(id))?;
        self.messages.remove(index);
        Ok(())
    }

    /// Move the message at `from` so it ends up at position `to`.
    pub fn move_message(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.messages.len();
        if from >= len {
            return Err(Error::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(Error::IndexOutOfRange { index: to, len });
        }
        let message = self.messages.remove(from);
        self.messages.insert(to, message);
        Ok(())
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// The built-in demo conversation.
    pub fn sample() -> Self {
        let mut script = Script {
            title: "Sample Conversation".into(),
            messages: Vec::new(),
        };
        script.add_message(Sender::Party1, "Hey! How are you doing today?", Vec::new(), 1000);
        script.add_message(
            Sender::Party2,
            "I'm doing great! Just finished a really interesting project. How about you?",
            Vec::new(),
            2000,
        );
        script.add_message(
            Sender::Party1,
            "That sounds awesome! What kind of project was it?",
            Vec::new(),
            1500,
        );
        script.add_message(
            Sender::Party2,
            "It was a conversation simulator app! I built it to help people create realistic message animations. Pretty cool, right?",
            Vec::new(),
            3000,
        );
        script.add_message(
            Sender::Party1,
            "Wow, that's really impressive! I love how the typing animation makes it feel so natural.",
            Vec::new(),
            2500,
        );
        script.add_message(
            Sender::Party2,
            "Thanks! The timing and visual effects really make a difference. Want to see how it works?",
            Vec::new(),
            2000,
        );
        script
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a script document. Bumps the id counter past any imported ids so
    /// later `add_message` calls cannot collide with them.
    pub fn from_json(json: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(json)?;
        let max_id = script.messages.iter().map(|m| m.id).max().unwrap_or(0);
        NEXT_MESSAGE_ID.fetch_max(max_id + 1, Ordering::Relaxed);
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }
}
