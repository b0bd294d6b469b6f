//! Externally owned playback state steering the player.
//!
//! The player never mutates this; it only reads snapshots and reacts to
//! changes. Speed is validated here so the scheduler can assume it is always
//! a sane divisor for its duration scaling.

use crate::error::{Error, Result};

/// Speed multipliers offered by the front end.
pub const SPEED_PRESETS: [f64; 4] = [0.5, 1.0, 2.0, 3.0];

/// Accepted speed multiplier range. Dividing a delay by a near-zero speed
/// overflows `Duration`, so extremes are rejected at this boundary.
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Count of messages already fully revealed, or the seek target.
    pub current_message_index: usize,
    speed: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_message_index: 0,
            speed: 1.0,
        }
    }
}

impl PlaybackState {
    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Back to the start: paused, position 0, speed 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Jump to a message index. Values past the end of the script are clamped
    /// by the player, which knows the script length.
    pub fn seek(&mut self, index: usize) {
        self.current_message_index = index;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed multiplier. Non-finite values and values outside
    /// [`MIN_SPEED`]`..=`[`MAX_SPEED`] are rejected here so they never reach
    /// the timeline driver.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(Error::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }
}
