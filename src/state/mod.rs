//! State management module for Star Match.
//!
//! This module provides the core state types:
//!
//! - `puzzle` - Pure puzzle generation helpers (targets, subset sums)
//! - `game` - The game state engine (pool, candidates, selection rule)
//! - `clock` - Caller-driven one-second countdown
//! - `status` - Derived game status (active / won / lost)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Session                             │
//! │                                                              │
//! │  click(n) ──▶ gate: status Active? number not Used?          │
//! │                  │                                           │
//! │                  ▼                                           │
//! │  ┌──────────────────────┐      ┌──────────────────────┐      │
//! │  │         Game         │      │    CountdownClock    │      │
//! │  │                      │      │                      │      │
//! │  │ target_sum           │      │ seconds_remaining    │      │
//! │  │ available_pool       │      │ tick() / cancel()    │      │
//! │  │ candidate_selection  │      │                      │      │
//! │  │ select_number()      │      │ ◀── tick(token)      │      │
//! │  └──────────┬───────────┘      └──────────┬───────────┘      │
//! │             │                             │                  │
//! │             └───────────┬─────────────────┘                  │
//! │                         ▼                                    │
//! │             status::evaluate(pool, seconds)                  │
//! │                         │                                    │
//! │                         ▼                                    │
//! │                 Snapshot (read-only)                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One logical actor owns the `Session`: clicks and ticks execute to
//! completion in arrival order, so no locking is needed. A reset replaces the
//! game and the clock and bumps the clock generation, which makes any
//! still-pending tick token stale.

pub mod clock;
pub mod game;
pub mod puzzle;
pub mod status;

// Re-export commonly used types
pub use clock::{CountdownClock, TickOutcome, DEFAULT_GAME_SECONDS};
pub use game::{ClickStatus, Game, NumberStatus, SelectOutcome};
pub use puzzle::{MAX_NUMBER, MIN_NUMBER};
pub use status::{evaluate, GameStatus};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Result of a click forwarded to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Candidate toggled, the round continues
    Toggled,
    /// Candidate sum matched the target; a new round began
    RoundWon,
    /// Final round won, every number is used
    GameWon,
    /// Click rejected: game not active, or the number is used
    Ignored,
}

/// Handle for delivering clock ticks to a session.
///
/// Issued by [`Session::arm_clock`] and bound to the clock generation at that
/// moment; a reset invalidates every previously issued token, so a timer
/// firing late can never tick a replaced game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub target_sum: u8,
    pub numbers: Vec<NumberCell>,
    pub seconds_remaining: u32,
    pub status: GameStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One number in a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct NumberCell {
    pub number: u8,
    pub status: NumberStatus,
}

/// One game session: engine, clock and randomness.
///
/// This is the entry point the presentation layer talks to. It gates clicks
/// on the derived status, routes ticks through a stale-token guard, and
/// produces [`Snapshot`]s after each state change.
#[derive(Debug)]
pub struct Session {
    game: Game,
    clock: CountdownClock,
    rng: ChaCha8Rng,
    clock_generation: u64,
    started_at: chrono::DateTime<chrono::Utc>,
    ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Session {
    /// Start a session with OS-seeded randomness.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Start a session with a fixed seed (deterministic, for tests).
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: ChaCha8Rng) -> Self {
        let game = Game::new(&mut rng);
        Self {
            game,
            clock: CountdownClock::default(),
            rng,
            clock_generation: 0,
            started_at: chrono::Utc::now(),
            ended_at: None,
        }
    }

    /// Current game status, derived on demand.
    pub fn status(&self) -> GameStatus {
        status::evaluate(self.game.available_pool(), self.clock.seconds_remaining())
    }

    /// Current target sum.
    pub fn target_sum(&self) -> u8 {
        self.game.target_sum()
    }

    /// Seconds left on the clock.
    pub fn seconds_remaining(&self) -> u32 {
        self.clock.seconds_remaining()
    }

    /// Presentation status of a number.
    pub fn number_status(&self, number: u8) -> NumberStatus {
        self.game.number_status(number)
    }

    /// Read-only access to the engine state.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle a click on a number.
    ///
    /// Clicks arriving after the game has ended, and clicks on used numbers,
    /// are no-ops. A click that empties the pool stops the clock.
    pub fn click(&mut self, number: u8) -> ClickOutcome {
        if !self.status().is_active() {
            return ClickOutcome::Ignored;
        }

        let Some(click_status) = self.game.number_status(number).as_click_status() else {
            return ClickOutcome::Ignored;
        };

        match self.game.select_number(number, click_status, &mut self.rng) {
            SelectOutcome::Toggled => ClickOutcome::Toggled,
            SelectOutcome::RoundWon { .. } => ClickOutcome::RoundWon,
            SelectOutcome::PoolCleared => {
                self.clock.cancel();
                self.ended_at = Some(chrono::Utc::now());
                ClickOutcome::GameWon
            }
        }
    }

    /// Arm the countdown for the next tick.
    ///
    /// Returns a token only while the game is active; once the status is
    /// terminal no further tick should be scheduled.
    pub fn arm_clock(&self) -> Option<TickToken> {
        if self.status().is_active() && !self.clock.is_cancelled() {
            Some(TickToken {
                generation: self.clock_generation,
            })
        } else {
            None
        }
    }

    /// Deliver one elapsed second.
    ///
    /// Ticks carrying a stale token (issued before a reset) and ticks
    /// arriving after the game has ended are ignored.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        if token.generation != self.clock_generation || !self.status().is_active() {
            return TickOutcome::Ignored;
        }

        let outcome = self.clock.tick();
        if outcome == TickOutcome::Expired {
            self.ended_at = Some(chrono::Utc::now());
        }
        outcome
    }

    /// Tear down the current game and start a fresh one.
    ///
    /// Cancels the clock and bumps the clock generation so that any pending
    /// tick token goes stale.
    pub fn reset(&mut self) {
        self.clock.cancel();
        self.clock_generation += 1;
        self.game = Game::new(&mut self.rng);
        self.clock = CountdownClock::default();
        self.started_at = chrono::Utc::now();
        self.ended_at = None;
    }

    /// Build the read-only snapshot for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            target_sum: self.game.target_sum(),
            numbers: puzzle::range(MIN_NUMBER, MAX_NUMBER)
                .into_iter()
                .map(|n| NumberCell {
                    number: n,
                    status: self.game.number_status(n),
                })
                .collect(),
            seconds_remaining: self.clock.seconds_remaining(),
            status: self.status(),
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }

    /// Convert the session to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        let numbers: Vec<serde_json::Value> = puzzle::range(MIN_NUMBER, MAX_NUMBER)
            .into_iter()
            .map(|n| {
                serde_json::json!({
                    "number": n,
                    "status": self.game.number_status(n).as_str(),
                })
            })
            .collect();

        serde_json::json!({
            "target_sum": self.game.target_sum(),
            "numbers": numbers,
            "seconds_remaining": self.clock.seconds_remaining(),
            "status": self.status().as_str(),
            "started_at": self.started_at.to_rfc3339(),
            "ended_at": self.ended_at.map(|t| t.to_rfc3339()),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
