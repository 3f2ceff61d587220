//! Typewriter headline animation.
//!
//! Types a phrase one character at a time, holds it, deletes it one
//! character at a time, then moves on to the next phrase and loops forever.
//! Time is fed in explicitly via [`Typewriter::advance`] so the animation is
//! driven by the event loop's ticks and is deterministic under test.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    /// Number of characters of the current phrase currently shown.
    shown: usize,
    phase: Phase,
    /// Time accumulated toward the next step.
    pending: Duration,
    pub type_speed: Duration,
    pub delete_speed: Duration,
    pub delay: Duration,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, type_speed: Duration) -> Self {
        Self {
            phrases,
            phrase: 0,
            shown: 0,
            phase: Phase::Typing,
            pending: Duration::ZERO,
            type_speed,
            delete_speed: type_speed,
            delay: Duration::from_millis(1000),
        }
    }

    pub fn set_speed(&mut self, speed: Duration) {
        self.type_speed = speed;
        self.delete_speed = speed;
    }

    fn step_len(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.type_speed,
            Phase::Holding => self.delay,
            Phase::Deleting => self.delete_speed,
        }
    }

    /// Move the animation forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.phrases.is_empty() {
            return;
        }
        self.pending += elapsed;
        loop {
            let step = self.step_len().max(Duration::from_millis(1));
            if self.pending < step {
                break;
            }
            self.pending -= step;
            self.step();
        }
    }

    fn step(&mut self) {
        let len = self.phrases[self.phrase].chars().count();
        match self.phase {
            Phase::Typing => {
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown >= len {
                    self.phase = Phase::Holding;
                }
            }
            Phase::Holding => self.phase = Phase::Deleting,
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                }
            }
        }
    }

    /// Visible text (without cursor).
    pub fn text(&self) -> &str {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return "";
        };
        match phrase.char_indices().nth(self.shown) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }
}
