pub mod config;
pub mod error;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod service;
pub mod session;
pub mod session_rng;
pub mod tictactoe;

pub use error::{ConfigError, GameError, StateViolation};
pub use identifiers::SessionId;
pub use service::{GameService, NewGame};
pub use session::{
    AggregateStats, GameSession, GameSnapshot, RegistrySettings, SessionHandle, SessionPhase,
    SessionRegistry,
};
pub use session_rng::SessionRng;
pub use tictactoe::{Board, Cell, Difficulty, Move, MovePolicy, Outcome, SearchEngine, Symbol};
