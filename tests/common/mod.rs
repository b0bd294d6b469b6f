//! Shared test helpers.

use convo_sim::config::DesignConfig;
use convo_sim::playback::PlaybackState;
use convo_sim::script::{Script, Sender};
use std::time::{Duration, Instant};

/// `base` shifted forward by `ms` milliseconds.
#[allow(dead_code)]
pub fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

/// Two messages: "Hi" (party1, delay 1000) and "Hello there" (party2, delay 2000).
#[allow(dead_code)]
pub fn two_message_script() -> Script {
    let mut script = Script::default();
    script.add_message(Sender::Party1, "Hi", Vec::new(), 1000);
    script.add_message(Sender::Party2, "Hello there", Vec::new(), 2000);
    script
}

#[allow(dead_code)]
pub fn design(show_typing: bool) -> DesignConfig {
    let mut design = DesignConfig::default();
    design.show_typing = show_typing;
    design
}

#[allow(dead_code)]
pub fn playing() -> PlaybackState {
    let mut playback = PlaybackState::default();
    playback.play();
    playback
}
