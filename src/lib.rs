//! Star Match State Library
//!
//! This crate provides state management for the Star Match puzzle: a target
//! star count in 1..=9 is shown, and the player must select numbers from a
//! 1..=9 pool whose sum equals the target before the countdown runs out.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Game State Engine** - The pool of playable numbers, the candidate
//!   selection, and the single transition rule that toggles candidates,
//!   detects winning sums, and draws the next target.
//!
//! - **Puzzle Generation** - Pure helpers for random targets and
//!   subset-sum draws, with injectable randomness for deterministic tests.
//!
//! - **Countdown Clock** - A caller-driven one-second countdown with
//!   explicit cancellation and stale-tick protection.
//!
//! - **Status Evaluation** - Won / Lost / Active derived on demand from the
//!   pool and the clock, never stored.
//!
//! # Design Principles
//!
//! 1. **One mutating entry point** - All puzzle mutation goes through
//!    `select_number`; derived values are recomputed on demand.
//!
//! 2. **No rendering, no I/O** - This crate is pure state. The presentation
//!    layer reads snapshots and forwards click/reset events.
//!
//! 3. **Deterministic under test** - Randomness is a seedable generator
//!    passed in, never ambient.
//!
//! 4. **Serialization-ready** - Snapshots can be converted to JSON for
//!    clients.
//!
//! # Example
//!
//! ```rust
//! use starmatch_state::state::{ClickOutcome, Session};
//!
//! let mut session = Session::with_seed(7);
//!
//! // Numbers 1..=9 start available; clicking builds a candidate sum.
//! let outcome = session.click(3);
//! assert_ne!(outcome, ClickOutcome::Ignored);
//!
//! // The caller owns the wall clock: arm, then tick once per second.
//! let token = session.arm_clock().expect("new game is active");
//! session.tick(token);
//! assert_eq!(session.seconds_remaining(), 9);
//!
//! // The presentation layer re-renders from snapshots.
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.numbers.len(), 9);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
