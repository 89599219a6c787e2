mod game_session;
mod registry;
mod snapshot;
mod statistics;

pub use game_session::{GameSession, SessionPhase};
pub use registry::{
    DEFAULT_CAPACITY, DEFAULT_EVICTION_BATCH, RegistrySettings, SessionHandle, SessionRegistry,
};
pub use snapshot::{GameSnapshot, SessionStats, WinningLine};
pub use statistics::{AggregateStats, GameResult, GameStatistics};
