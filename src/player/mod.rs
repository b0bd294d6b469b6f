//! Conversation playback: timeline driver plus reactive state synchronizer.
//!
//! The player turns a script and externally owned playback state into a timed
//! sequence of message reveals. It advances one message at a time through a
//! pending-timer queue: a pre-reveal delay timer, then (if typing is enabled)
//! a typing-phase timer whose firing reveals the message and schedules the
//! next delay. A host loop pumps the queue with [`ConversationPlayer::tick`]
//! and reconciles external state changes with [`ConversationPlayer::sync`].
//!
//! Follow-up timers are scheduled relative to the firing timer's deadline,
//! not the pump's wall clock, so chain timing is exact regardless of how
//! often the host ticks.

mod timer;
pub mod typing;

use crate::config::DesignConfig;
use crate::playback::PlaybackState;
use crate::script::{Message, Script, Sender};
use std::time::{Duration, Instant};
use timer::{PendingTimer, TimerKind, TimerQueue};
use typing::estimate_typing_duration;

/// Plays a script of messages against a mutable playback intent.
///
/// All concurrency is cooperative: the only suspension points are the two
/// timer deadlines per message, and the single `running` flag is checked at
/// the top of every timer firing so a timer outliving a stop, seek or reset
/// observes the flag and does nothing.
pub struct ConversationPlayer {
    /// Snapshot of the script taken at the last `sync`.
    messages: Vec<Message>,
    show_typing: bool,
    speed: f64,

    /// Messages revealed so far; always a prefix of the script.
    displayed: Vec<Message>,
    /// Set while the typing indicator is up for the next message's sender.
    typing_sender: Option<Sender>,
    /// Whether the driver believes it is actively advancing.
    running: bool,
    /// Index of the next message to reveal. Equals `displayed.len()`.
    cursor: usize,
    timers: TimerQueue,

    // Last-observed inputs, for change detection across syncs. Not
    // meaningful until the first sync has adopted the inputs.
    synced: bool,
    seen_playing: bool,
    seen_index: usize,
    seen_speed: f64,
    seen_len: usize,
}

impl Default for ConversationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationPlayer {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            show_typing: true,
            speed: 1.0,
            displayed: Vec::new(),
            typing_sender: None,
            running: false,
            cursor: 0,
            timers: TimerQueue::default(),
            synced: false,
            seen_playing: false,
            seen_index: 0,
            seen_speed: 1.0,
            seen_len: 0,
        }
    }

    /// Reconcile with the latest snapshots of the externally owned inputs.
    ///
    /// Call whenever any input may have changed. Reactions are evaluated in a
    /// fixed order: play/pause transition, seek, speed change, script
    /// replacement. `now` is the scheduling origin for any timers started
    /// here.
    pub fn sync(
        &mut self,
        script: &Script,
        playback: &PlaybackState,
        design: &DesignConfig,
        now: Instant,
    ) {
        self.messages = script.messages.clone();
        self.show_typing = design.show_typing;
        self.speed = playback.speed();

        let len = self.messages.len();

        // First activation adopts the inputs as-is; there is no previous
        // observation to diff against.
        if !self.synced {
            self.synced = true;
            let target = playback.current_message_index.min(len);
            self.cursor = target;
            self.displayed = self.messages[..target].to_vec();
            if playback.is_playing {
                self.start(now);
            }
            self.seen_playing = playback.is_playing;
            self.seen_index = playback.current_message_index;
            self.seen_speed = playback.speed();
            self.seen_len = len;
            return;
        }

        // Play/pause transitions.
        if playback.is_playing != self.seen_playing {
            if playback.is_playing {
                self.start(now);
            } else {
                self.stop();
            }
        }

        // Seek: the external index was set to something other than our cursor.
        if playback.current_message_index != self.seen_index {
            let target = playback.current_message_index.min(len);
            if target != self.cursor {
                self.stop();
                self.cursor = target;
                if target == 0 {
                    self.displayed.clear();
                } else {
                    self.displayed = self.messages[..target].to_vec();
                }
                tracing::debug!("seek to message {}", target);
            }
        }

        // Speed change mid-flight: restart the current message's delay and
        // typing phase from zero under the new speed. Elapsed time is not
        // prorated.
        if playback.speed() != self.seen_speed && self.running && self.cursor > 0 {
            let cursor = self.cursor;
            self.stop();
            self.displayed = self.messages[..cursor].to_vec();
            self.cursor = cursor;
            tracing::debug!("speed changed to {}, restarting message {}", self.speed, cursor);
            if playback.is_playing {
                self.start(now);
            }
        }

        // Script replacement. A length change is the replacement signal;
        // same-length in-place edits are intentionally not detected.
        if len != self.seen_len {
            self.stop();
            self.displayed.clear();
            self.cursor = 0;
            tracing::debug!("script replaced ({} messages), playback reset", len);
        }

        self.seen_playing = playback.is_playing;
        self.seen_index = playback.current_message_index;
        self.seen_speed = playback.speed();
        self.seen_len = len;
    }

    /// Begin advancing from the current cursor. No-op when already running or
    /// at end of script.
    pub fn start(&mut self, now: Instant) {
        if self.running || self.cursor >= self.messages.len() {
            return;
        }
        self.running = true;
        tracing::debug!("playback started at message {} (speed {})", self.cursor, self.speed);
        self.schedule_delay(self.cursor, now);
    }

    /// Stop advancing and invalidate every pending timer. Zero live timers
    /// remain on return; an in-flight typing indicator is dropped. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.timers.invalidate_all();
        self.typing_sender = None;
    }

    /// Fire every timer due at `now`, in deadline order. Returns the number
    /// of timers fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            self.fire(timer);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, timer: PendingTimer) {
        if !self.running {
            // Stale timer: playback stopped after it was scheduled.
            return;
        }
        tracing::trace!("timer {} fired", timer.id);
        match timer.kind {
            TimerKind::Delay { index } => {
                let Some(message) = self.messages.get(index) else {
                    self.stop();
                    return;
                };
                if self.show_typing {
                    let typing = scaled(estimate_typing_duration(message), self.speed);
                    self.typing_sender = Some(message.sender);
                    let id = self
                        .timers
                        .schedule(timer.fire_at + typing, TimerKind::Typing { index });
                    tracing::trace!("typing timer {} scheduled for message {}", id, index);
                } else {
                    self.reveal(index, timer.fire_at);
                }
            }
            TimerKind::Typing { index } => {
                self.typing_sender = None;
                self.reveal(index, timer.fire_at);
            }
        }
    }

    /// Append the message at `index` to the displayed prefix and chain into
    /// the next step. `at` is the logical time of the reveal.
    fn reveal(&mut self, index: usize, at: Instant) {
        let Some(message) = self.messages.get(index) else {
            self.stop();
            return;
        };
        tracing::debug!("revealed message {} from {}", index, message.sender.label());
        self.displayed.push(message.clone());
        self.cursor = index + 1;
        self.schedule_delay(index + 1, at);
    }

    /// Schedule the pre-reveal delay for `index`, or finish at end of script.
    fn schedule_delay(&mut self, index: usize, now: Instant) {
        let Some(message) = self.messages.get(index) else {
            self.running = false;
            tracing::debug!("playback finished");
            return;
        };
        let delay = scaled(Duration::from_millis(message.delay_ms), self.speed);
        let id = self.timers.schedule(now + delay, TimerKind::Delay { index });
        tracing::trace!("delay timer {} scheduled for message {}", id, index);
    }

    /// Messages revealed so far, in script order.
    pub fn displayed_messages(&self) -> &[Message] {
        &self.displayed
    }

    pub fn is_typing(&self) -> bool {
        self.typing_sender.is_some()
    }

    /// The party currently "typing". Only meaningful while `is_typing`.
    pub fn typing_sender(&self) -> Option<Sender> {
        self.typing_sender
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the next message to reveal.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Earliest pending timer deadline, if any. Hosts sleep until this.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

fn scaled(base: Duration, speed: f64) -> Duration {
    base.div_f64(speed)
}
