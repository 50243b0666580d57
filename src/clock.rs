// src/clock.rs
use std::time::{Duration, Instant};

use crate::types::Color;

/// Remaining time per side. The running side is charged lazily: nothing
/// ticks in the background, elapsed time is derived from the checkpoint
/// whenever it is asked for.
#[derive(Debug, Clone)]
pub struct TurnClock {
    remaining: [Duration; 2],
    active: Color,
    checkpoint: Option<Instant>,
}

impl TurnClock {
    pub fn new(budget: Duration) -> Self {
        TurnClock { remaining: [budget; 2], active: Color::White, checkpoint: None }
    }

    pub fn start(&mut self, active: Color) {
        self.start_at(active, Instant::now());
    }

    pub fn start_at(&mut self, active: Color, now: Instant) {
        self.active = active;
        self.checkpoint = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.checkpoint.is_some()
    }

    pub fn active(&self) -> Color {
        self.active
    }

    /// Seconds left for the side on the clock, never negative.
    pub fn seconds_left(&self) -> f64 {
        self.seconds_left_at(Instant::now())
    }

    pub fn seconds_left_at(&self, now: Instant) -> f64 {
        self.remaining_at(now).as_secs_f64()
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        let budget = self.remaining[self.active.index()];
        match self.checkpoint {
            Some(start) => budget.saturating_sub(now.saturating_duration_since(start)),
            None => budget,
        }
    }

    /// Stored budget for `color`; for the running side this excludes the
    /// current turn.
    pub fn budget(&self, color: Color) -> Duration {
        self.remaining[color.index()]
    }

    pub fn end_turn(&mut self) -> Duration {
        self.end_turn_at(Instant::now())
    }

    /// Charges the finished side, hands the clock to the other side and
    /// returns what the finished side has left.
    pub fn end_turn_at(&mut self, now: Instant) -> Duration {
        let finished = self.active;
        let left = self.remaining_at(now);
        self.remaining[finished.index()] = left;
        self.active = finished.opponent();
        if self.checkpoint.is_some() {
            self.checkpoint = Some(now);
        }
        left
    }

    /// Charges the running side and stops the clock.
    pub fn stop_at(&mut self, now: Instant) {
        if self.checkpoint.is_some() {
            self.remaining[self.active.index()] = self.remaining_at(now);
            self.checkpoint = None;
        }
    }
}
