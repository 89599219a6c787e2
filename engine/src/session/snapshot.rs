use serde::Serialize;

use super::game_session::SessionPhase;
use crate::SessionId;
use crate::tictactoe::{BOARD_SIZE, Cell, Difficulty, Move, PositionAnalysis, Symbol};

/// Serializable view of one session handed to callers after every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub game_id: SessionId,
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub current_player: Symbol,
    pub human_symbol: Symbol,
    pub ai_symbol: Symbol,
    pub difficulty: Difficulty,
    pub phase: SessionPhase,
    pub game_over: bool,
    pub winner: Option<Symbol>,
    pub winning_line: Option<WinningLine>,
    pub moves_count: u32,
    pub message: &'static str,
    pub last_ai_move: Option<Move>,
    pub nodes_evaluated: u64,
    /// Present only once the game is finished.
    pub session_stats: Option<SessionStats>,
    pub analysis: PositionAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    pub symbol: Symbol,
    pub cells: [Move; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub moves_count: u32,
    pub duration_seconds: f64,
    pub difficulty: Difficulty,
    /// Nodes searched for the last AI move of the game.
    pub nodes_evaluated: u64,
}
