use thiserror::Error;

use crate::SessionId;

/// Why a session refused to apply a move in its current state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateViolation {
    #[error("game is already over")]
    GameOver,

    #[error("it is not the human player's turn")]
    NotHumanTurn,

    #[error("it is not the AI's turn")]
    NotAiTurn,

    #[error("no empty cells left to play")]
    NoMovesLeft,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("game session {0} not found")]
    NotFound(SessionId),

    #[error("invalid state: {0}")]
    InvalidState(#[from] StateViolation),

    #[error("illegal move: cell ({row}, {col}) is occupied or off the board")]
    IllegalMove { row: i64, col: i64 },

    #[error("invalid symbol '{0}' (expected 'X' or 'O')")]
    InvalidSymbol(String),

    #[error("invalid difficulty '{0}' (expected easy, medium, hard or impossible)")]
    InvalidDifficulty(String),

    #[error("invalid board layout: {0}")]
    InvalidBoard(String),
}

impl GameError {
    /// Stable tag reported to clients next to the human-readable message.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "not_found",
            GameError::InvalidState(_) => "invalid_state",
            GameError::IllegalMove { .. } => "illegal_move",
            GameError::InvalidSymbol(_) => "invalid_symbol",
            GameError::InvalidDifficulty(_) => "invalid_difficulty",
            GameError::InvalidBoard(_) => "invalid_board",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_violation_converts_into_invalid_state() {
        let error: GameError = StateViolation::NotAiTurn.into();
        assert_eq!(error, GameError::InvalidState(StateViolation::NotAiTurn));
        assert_eq!(error.kind(), "invalid_state");
        assert_eq!(error.to_string(), "invalid state: it is not the AI's turn");
    }

    #[test]
    fn not_found_mentions_the_session() {
        let error = GameError::NotFound(SessionId::from("game-1"));
        assert_eq!(error.to_string(), "game session game-1 not found");
        assert_eq!(error.kind(), "not_found");
    }
}
