mod board;
mod difficulty;
pub mod evaluator;
mod search;
mod types;

pub use board::{BOARD_SIZE, Board};
pub use difficulty::{
    Difficulty, HARD_OPTIMAL_PROBABILITY, MEDIUM_OPTIMAL_PROBABILITY, MovePolicy,
};
pub use evaluator::{PositionAnalysis, StatusReport, WIN_SCORE};
pub use search::SearchEngine;
pub use types::{Cell, Move, Outcome, Symbol};
