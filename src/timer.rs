// SPDX-License-Identifier: MPL-2.0
//! Pausable single-shot countdown.
//!
//! [`PausableTimer`] is pure bookkeeping over wall-clock deltas: it never
//! spawns a thread or touches a scheduler. The owner passes an explicit
//! `now: Instant` to every operation and polls [`PausableTimer::is_expired`]
//! to find out whether the countdown has run out. Explicit instants make
//! every timing behavior reproducible under test without sleeping.
//!
//! Pausing freezes the remaining time; resuming restarts the countdown
//! from the frozen value. None of the operations can fail. Precision is
//! bounded by how often the owner polls.

use std::time::{Duration, Instant};

/// Single-shot countdown with pause/resume.
#[derive(Debug, Clone)]
pub struct PausableTimer {
    /// Time left on the countdown as of `started_at` (running) or as of
    /// the last pause (paused).
    remaining: Duration,
    /// `Some` while running, `None` while paused.
    started_at: Option<Instant>,
}

impl PausableTimer {
    /// Starts a countdown of `duration` measured from `now`.
    ///
    /// A zero duration is expired on the first poll at or after `now`.
    #[must_use]
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            remaining: duration,
            started_at: Some(now),
        }
    }

    /// Freezes the countdown and returns the time remaining.
    ///
    /// Idempotent: pausing an already-paused timer returns the same
    /// remaining value again without re-measuring.
    pub fn pause(&mut self, now: Instant) -> Duration {
        if let Some(started_at) = self.started_at.take() {
            self.remaining = self
                .remaining
                .saturating_sub(now.saturating_duration_since(started_at));
        }
        self.remaining
    }

    /// Restarts the countdown from the remaining value captured at the
    /// last pause. No-op on a timer that is already running.
    pub fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Returns `true` while the countdown is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.started_at.is_none()
    }

    /// Time left on the countdown as observed at `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(started_at)),
            None => self.remaining,
        }
    }

    /// Returns `true` once a running countdown has elapsed. A paused
    /// timer never expires.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.started_at {
            Some(started_at) => now.saturating_duration_since(started_at) >= self.remaining,
            None => false,
        }
    }
}
