//! Game status evaluation.
//!
//! Stateless: the status is derived on demand from the available pool and the
//! countdown, never stored. An empty pool wins even at zero seconds.

use serde::Serialize;
use std::collections::BTreeSet;

/// Overall game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Game in progress, clicks and ticks are accepted
    Active,
    /// Every number has been used in a winning round
    Won,
    /// The countdown expired with numbers still in play
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Check if the game can still receive actions.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if the game has ended (cannot change).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Derive the game status from the pool and the countdown.
///
/// Won takes precedence over Lost: clearing the pool on the last second is
/// still a win.
pub fn evaluate(available_pool: &BTreeSet<u8>, seconds_remaining: u32) -> GameStatus {
    if available_pool.is_empty() {
        GameStatus::Won
    } else if seconds_remaining == 0 {
        GameStatus::Lost
    } else {
        GameStatus::Active
    }
}
