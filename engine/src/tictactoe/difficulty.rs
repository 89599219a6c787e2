use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::search::SearchEngine;
use super::types::Move;
use crate::{GameError, SessionRng};

pub const MEDIUM_OPTIMAL_PROBABILITY: f64 = 0.7;
pub const HARD_OPTIMAL_PROBABILITY: f64 = 0.9;

/// Difficulty tier as chosen by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub fn policy(self) -> MovePolicy {
        match self {
            Difficulty::Easy => MovePolicy::Random,
            Difficulty::Medium => MovePolicy::MostlyOptimal(MEDIUM_OPTIMAL_PROBABILITY),
            Difficulty::Hard => MovePolicy::MostlyOptimal(HARD_OPTIMAL_PROBABILITY),
            Difficulty::Impossible => MovePolicy::PerfectPlay,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Impossible => "impossible",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == normalized)
            .ok_or_else(|| GameError::InvalidDifficulty(s.to_string()))
    }
}

/// How the AI picks its move. New tiers only need a variant here and an
/// arm in [`MovePolicy::select_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovePolicy {
    /// Uniformly random empty cell.
    Random,
    /// Perfect move with the given probability, random otherwise.
    MostlyOptimal(f64),
    PerfectPlay,
}

impl MovePolicy {
    /// Picks a move for `engine`'s symbol. The engine's node counter is
    /// reset first, so it stays at zero when no search ran.
    pub fn select_move(
        self,
        board: &Board,
        engine: &mut SearchEngine,
        rng: &mut SessionRng,
    ) -> Option<Move> {
        engine.reset_node_count();
        match self {
            MovePolicy::Random => random_move(board, rng),
            MovePolicy::MostlyOptimal(p) => {
                if rng.chance(p) {
                    engine.best_move(board)
                } else {
                    random_move(board, rng)
                }
            }
            MovePolicy::PerfectPlay => engine.best_move(board),
        }
    }
}

fn random_move(board: &Board, rng: &mut SessionRng) -> Option<Move> {
    let moves = board.empty_cells();
    rng.choose(&moves).copied()
}
