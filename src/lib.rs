//! Conversation playback simulator
//!
//! Plays a scripted two-party text conversation as a timed animation:
//! messages appear in order after per-message delays, optionally preceded by
//! a simulated typing pause scaled to message length. The player is driven by
//! a pending-timer queue pumped from a host loop and stays consistent under
//! external pause/seek/speed/script changes.

pub mod config;
pub mod error;
pub mod playback;
pub mod player;
pub mod render;
pub mod script;

pub use error::{Error, Result};
pub use player::ConversationPlayer;
