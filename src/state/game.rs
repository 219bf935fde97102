//! Game state engine.
//!
//! Owns the puzzle state for one game: the target sum, the pool of numbers
//! still in play, and the current candidate selection. All mutation goes
//! through [`Game::select_number`]; everything else is a derived view.
//!
//! A number lives in exactly one place at a time: selecting it moves it from
//! the pool into the candidate selection, deselecting it moves it back, and a
//! winning sum consumes the candidates outright (they become used). The engine
//! is status-agnostic: gating clicks on the overall game status is the
//! caller's job (see [`super::Session`]).

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;

use super::puzzle::{self, MAX_NUMBER, MIN_NUMBER};

/// Presentation status of a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStatus {
    /// In the pool, selectable
    Available,
    /// Selected, candidate sum does not exceed the target
    CandidateValid,
    /// Selected, candidate sum overshoots the target
    CandidateInvalid,
    /// Consumed by a winning round, no longer playable
    Used,
}

impl NumberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CandidateValid => "candidate_valid",
            Self::CandidateInvalid => "candidate_invalid",
            Self::Used => "used",
        }
    }

    /// Check if the number is currently selected.
    pub fn is_candidate(&self) -> bool {
        matches!(self, Self::CandidateValid | Self::CandidateInvalid)
    }

    /// Collapse to the two-valued status the engine consumes.
    ///
    /// `None` means the number is used and the click must not reach the
    /// engine at all.
    pub fn as_click_status(&self) -> Option<ClickStatus> {
        match self {
            Self::Available => Some(ClickStatus::Available),
            Self::CandidateValid | Self::CandidateInvalid => Some(ClickStatus::Candidate),
            Self::Used => None,
        }
    }
}

/// Status of a number at the moment it is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStatus {
    Available,
    Candidate,
}

/// Result of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Candidate toggled, the round continues
    Toggled,
    /// Candidate sum matched the target; a fresh target was drawn
    RoundWon { new_target: u8 },
    /// Candidate sum matched the target and emptied the pool
    PoolCleared,
}

impl SelectOutcome {
    /// Check if this selection completed a round.
    pub fn is_win(&self) -> bool {
        matches!(self, Self::RoundWon { .. } | Self::PoolCleared)
    }
}

/// Puzzle state for one game.
#[derive(Debug, Clone)]
pub struct Game {
    /// Star count to match this round
    target_sum: u8,

    /// Numbers still in play and not currently selected
    available_pool: BTreeSet<u8>,

    /// Currently selected numbers, in click order
    candidate_selection: Vec<u8>,

    /// When this game was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Game {
    /// Create a new game with a random target and a full pool.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_target(puzzle::random_int(rng, MIN_NUMBER, MAX_NUMBER))
    }

    /// Create a game at a known target (for restoring state).
    pub fn with_target(target_sum: u8) -> Self {
        debug_assert!(
            (MIN_NUMBER..=MAX_NUMBER).contains(&target_sum),
            "target sum outside 1..=9"
        );
        Self {
            target_sum,
            available_pool: puzzle::range(MIN_NUMBER, MAX_NUMBER).into_iter().collect(),
            candidate_selection: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Current target sum.
    pub fn target_sum(&self) -> u8 {
        self.target_sum
    }

    /// Numbers still in play and not selected.
    pub fn available_pool(&self) -> &BTreeSet<u8> {
        &self.available_pool
    }

    /// Currently selected numbers, in click order.
    pub fn candidate_selection(&self) -> &[u8] {
        &self.candidate_selection
    }

    /// Sum of the current candidate selection.
    pub fn candidate_sum(&self) -> u32 {
        puzzle::sum(&self.candidate_selection)
    }

    /// Derive the presentation status of a number.
    pub fn number_status(&self, number: u8) -> NumberStatus {
        if self.candidate_selection.contains(&number) {
            if self.candidate_sum() > u32::from(self.target_sum) {
                NumberStatus::CandidateInvalid
            } else {
                NumberStatus::CandidateValid
            }
        } else if self.available_pool.contains(&number) {
            NumberStatus::Available
        } else {
            NumberStatus::Used
        }
    }

    /// Apply a click to a number.
    ///
    /// Toggles the number between pool and candidate selection, then checks
    /// the candidate sum against the target. On a match the candidates are
    /// consumed (marked used) and, if numbers remain, a new target achievable
    /// from the remaining pool is drawn atomically with the win.
    ///
    /// Status-agnostic: the caller must reject clicks on used numbers and
    /// clicks arriving after the game has ended.
    pub fn select_number<R: Rng + ?Sized>(
        &mut self,
        number: u8,
        current: ClickStatus,
        rng: &mut R,
    ) -> SelectOutcome {
        debug_assert!(
            (MIN_NUMBER..=MAX_NUMBER).contains(&number),
            "number outside 1..=9"
        );

        let deselected = match current {
            ClickStatus::Available => {
                debug_assert!(
                    self.available_pool.contains(&number),
                    "available click on a number not in the pool"
                );
                self.available_pool.remove(&number);
                self.candidate_selection.push(number);
                false
            }
            ClickStatus::Candidate => {
                debug_assert!(
                    self.candidate_selection.contains(&number),
                    "candidate click on a number not selected"
                );
                self.candidate_selection.retain(|&c| c != number);
                true
            }
        };

        if self.candidate_sum() == u32::from(self.target_sum) {
            // A deselected number was not part of the winning sum: it goes
            // back to the pool instead of being consumed with the winners.
            if deselected {
                self.available_pool.insert(number);
            }

            // The winning candidates already left the pool when selected, so
            // dropping them here marks them used.
            self.candidate_selection.clear();

            if self.available_pool.is_empty() {
                SelectOutcome::PoolCleared
            } else {
                let pool: Vec<u8> = self.available_pool.iter().copied().collect();
                self.target_sum = puzzle::random_sum_in(rng, &pool, MAX_NUMBER);
                SelectOutcome::RoundWon {
                    new_target: self.target_sum,
                }
            }
        } else {
            if deselected {
                self.available_pool.insert(number);
            }
            SelectOutcome::Toggled
        }
    }

    /// Convert engine state to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "target_sum": self.target_sum,
            "available_pool": self.available_pool.iter().collect::<Vec<_>>(),
            "candidate_selection": self.candidate_selection,
            "candidate_sum": self.candidate_sum(),
            "created_at": self.created_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Click a number, deriving its status the way the caller would.
    fn click(game: &mut Game, number: u8, rng: &mut ChaCha8Rng) -> SelectOutcome {
        let status = game
            .number_status(number)
            .as_click_status()
            .expect("clicked a used number");
        game.select_number(number, status, rng)
    }

    /// Check that `target` is the sum of some non-empty subset of `pool`.
    fn achievable(pool: &BTreeSet<u8>, target: u8) -> bool {
        let pool: Vec<u8> = pool.iter().copied().collect();
        (1u32..1 << pool.len()).any(|mask| {
            let sum: u32 = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &n)| u32::from(n))
                .sum();
            sum == u32::from(target)
        })
    }

    fn assert_invariants(game: &Game) {
        // No duplicates in the selection, and the selection is disjoint
        // from the pool.
        let mut seen = BTreeSet::new();
        for &n in game.candidate_selection() {
            assert!(seen.insert(n), "duplicate candidate {}", n);
            assert!(
                !game.available_pool().contains(&n),
                "candidate {} still in pool",
                n
            );
        }
        assert!((1..=9).contains(&game.target_sum()));
    }

    #[test]
    fn test_new_game() {
        let mut rng = rng();
        let game = Game::new(&mut rng);

        assert!((1..=9).contains(&game.target_sum()));
        assert_eq!(game.available_pool().len(), 9);
        assert!(game.candidate_selection().is_empty());
        for n in 1..=9 {
            assert_eq!(game.number_status(n), NumberStatus::Available);
        }
    }

    #[test]
    fn test_partial_selection_stays_open() {
        // Target 7, click 3 -> candidate [3], sum below target.
        let mut rng = rng();
        let mut game = Game::with_target(7);

        let outcome = click(&mut game, 3, &mut rng);

        assert_eq!(outcome, SelectOutcome::Toggled);
        assert_eq!(game.candidate_selection(), &[3]);
        assert_eq!(game.candidate_sum(), 3);
        assert_eq!(game.number_status(3), NumberStatus::CandidateValid);
        assert!(!game.available_pool().contains(&3));
        assert_invariants(&game);
    }

    #[test]
    fn test_winning_round_consumes_candidates() {
        // Target 7, click 3 then 4 -> win, pool loses both.
        let mut rng = rng();
        let mut game = Game::with_target(7);

        click(&mut game, 3, &mut rng);
        let outcome = click(&mut game, 4, &mut rng);

        assert!(outcome.is_win());
        assert!(game.candidate_selection().is_empty());
        assert_eq!(game.available_pool().len(), 7);
        assert_eq!(game.number_status(3), NumberStatus::Used);
        assert_eq!(game.number_status(4), NumberStatus::Used);

        // New target is drawn from the remaining numbers and is winnable.
        assert!(achievable(game.available_pool(), game.target_sum()));
        assert_invariants(&game);
    }

    #[test]
    fn test_toggle_round_trip() {
        // Target 7, click 5 twice -> back where we started.
        let mut rng = rng();
        let mut game = Game::with_target(7);

        click(&mut game, 5, &mut rng);
        assert_eq!(game.number_status(5), NumberStatus::CandidateValid);

        let outcome = click(&mut game, 5, &mut rng);
        assert_eq!(outcome, SelectOutcome::Toggled);
        assert!(game.candidate_selection().is_empty());
        assert_eq!(game.number_status(5), NumberStatus::Available);
        assert_eq!(game.available_pool().len(), 9);
        assert_eq!(game.target_sum(), 7);
    }

    #[test]
    fn test_overshoot_marks_candidates_invalid() {
        let mut rng = rng();
        let mut game = Game::with_target(7);

        click(&mut game, 5, &mut rng);
        click(&mut game, 6, &mut rng);

        assert_eq!(game.candidate_sum(), 11);
        assert_eq!(game.number_status(5), NumberStatus::CandidateInvalid);
        assert_eq!(game.number_status(6), NumberStatus::CandidateInvalid);
        assert!(game.number_status(5).is_candidate());
        assert_invariants(&game);
    }

    #[test]
    fn test_deselection_win_returns_clicked_number() {
        // Candidates [2, 4, 3] sum 9 (partial sums 2, 6, 9 never hit the
        // target); deselecting 4 leaves a winning 5. The 4 was not part of
        // the winning sum and must stay playable.
        let mut rng = rng();
        let mut game = Game::with_target(5);

        click(&mut game, 2, &mut rng);
        click(&mut game, 4, &mut rng);
        click(&mut game, 3, &mut rng);
        assert_eq!(game.candidate_sum(), 9);
        assert_eq!(game.number_status(4), NumberStatus::CandidateInvalid);

        let outcome = click(&mut game, 4, &mut rng);

        assert!(outcome.is_win());
        assert_eq!(game.number_status(2), NumberStatus::Used);
        assert_eq!(game.number_status(3), NumberStatus::Used);
        assert_eq!(game.number_status(4), NumberStatus::Available);
        assert_invariants(&game);
    }

    #[test]
    fn test_regeneration_always_achievable() {
        // Win rounds until the pool empties; every intermediate target must
        // be reachable from the pool it was drawn over.
        let mut rng = rng();
        let mut game = Game::with_target(9);

        loop {
            let target = game.target_sum();
            let pool: Vec<u8> = game.available_pool().iter().copied().collect();

            // Find a subset summing to the target; the generator guarantees
            // one exists.
            let mask = (1u32..1 << pool.len())
                .find(|mask| {
                    pool.iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, &n)| u32::from(n))
                        .sum::<u32>()
                        == u32::from(target)
                })
                .expect("target not achievable from pool");

            let subset: Vec<u8> = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &n)| n)
                .collect();

            let mut last = SelectOutcome::Toggled;
            for &n in &subset {
                last = click(&mut game, n, &mut rng);
            }
            assert!(last.is_win());
            assert_invariants(&game);

            if last == SelectOutcome::PoolCleared {
                break;
            }
        }

        assert!(game.available_pool().is_empty());
        for n in 1..=9 {
            assert_eq!(game.number_status(n), NumberStatus::Used);
        }
    }

    #[test]
    fn test_random_driver_preserves_invariants() {
        // Hammer the engine with arbitrary (valid) clicks.
        let mut rng = rng();
        let mut game = Game::new(&mut rng);

        for _ in 0..500 {
            if game.available_pool().is_empty() && game.candidate_selection().is_empty() {
                break;
            }
            let n = puzzle::random_int(&mut rng, MIN_NUMBER, MAX_NUMBER);
            if game.number_status(n) == NumberStatus::Used {
                continue;
            }
            click(&mut game, n, &mut rng);
            assert_invariants(&game);
        }
    }

    #[test]
    fn test_to_json() {
        let mut rng = rng();
        let mut game = Game::with_target(7);
        click(&mut game, 2, &mut rng);

        let json = game.to_json();
        assert_eq!(json["target_sum"], 7);
        assert_eq!(json["candidate_selection"], serde_json::json!([2]));
        assert_eq!(json["candidate_sum"], 2);
        assert_eq!(json["available_pool"].as_array().unwrap().len(), 8);
    }
}
