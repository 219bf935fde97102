//! Countdown clock.
//!
//! One-second-resolution countdown for a game session. The clock does not
//! schedule anything itself: the embedding layer owns the wall clock and calls
//! [`CountdownClock::tick`] once per elapsed second while the game is active.
//! Once cancelled (session reset, teardown, or a terminal status) the clock
//! ignores every further tick; it is never re-armed, a new game gets a new
//! clock.

/// Seconds on the clock at the start of a game.
pub const DEFAULT_GAME_SECONDS: u32 = 10;

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second elapsed, time remains
    Ticked(u32),
    /// The decrement reached zero
    Expired,
    /// No-op: clock cancelled or already at zero
    Ignored,
}

/// Per-session countdown state.
#[derive(Debug, Clone)]
pub struct CountdownClock {
    seconds_remaining: u32,
    cancelled: bool,
}

impl CountdownClock {
    /// Create a clock with a full countdown.
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds_remaining: seconds,
            cancelled: false,
        }
    }

    /// Seconds left on the clock.
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Apply one elapsed second.
    ///
    /// Decrements by exactly 1, never below zero. Cancelled clocks and clocks
    /// already at zero report [`TickOutcome::Ignored`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.cancelled || self.seconds_remaining == 0 {
            return TickOutcome::Ignored;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked(self.seconds_remaining)
        }
    }

    /// Stop the clock permanently.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Check if the clock has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Check if the countdown has reached zero.
    pub fn is_expired(&self) -> bool {
        self.seconds_remaining == 0
    }
}

impl Default for CountdownClock {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_SECONDS)
    }
}
