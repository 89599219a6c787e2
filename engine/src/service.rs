use serde::Serialize;

use crate::session::{AggregateStats, GameSnapshot, RegistrySettings, SessionRegistry};
use crate::tictactoe::{Difficulty, Move, Outcome, Symbol};
use crate::{GameError, SessionId, log_debug};

/// Result of [`GameService::create_session`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGame {
    pub game_id: SessionId,
    pub ai_goes_first: bool,
    pub message: &'static str,
    pub state: GameSnapshot,
}

/// Request-level operations over the session registry.
///
/// Each call locks at most one session, applies the whole request under that
/// lock and answers with a fresh snapshot.
#[derive(Debug, Clone)]
pub struct GameService {
    registry: SessionRegistry,
}

impl GameService {
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            registry: SessionRegistry::new(settings),
        }
    }

    pub async fn create_session(&self, difficulty: Difficulty, human_symbol: Symbol) -> NewGame {
        let (game_id, handle) = self.registry.create(difficulty, human_symbol).await;
        let session = handle.lock().await;
        let ai_goes_first = session.ai_moves_first();

        NewGame {
            game_id,
            ai_goes_first,
            message: if ai_goes_first {
                "AI goes first!"
            } else {
                "You go first!"
            },
            state: session.snapshot(),
        }
    }

    /// Plays the human move and, unless it ended the game, the AI reply.
    pub async fn submit_human_move(
        &self,
        session_id: &SessionId,
        mv: Move,
    ) -> Result<GameSnapshot, GameError> {
        let handle = self.registry.get(session_id).await?;
        let mut session = handle.lock().await;

        if session.apply_human_move(mv)? == Outcome::Ongoing {
            let reply = session.apply_ai_move()?;
            log_debug!("[game:{}] human {} answered with {}", session_id, mv, reply);
        }
        Ok(session.snapshot())
    }

    pub async fn request_ai_move(&self, session_id: &SessionId) -> Result<GameSnapshot, GameError> {
        let handle = self.registry.get(session_id).await?;
        let mut session = handle.lock().await;
        session.apply_ai_move()?;
        Ok(session.snapshot())
    }

    pub async fn get_state(&self, session_id: &SessionId) -> Result<GameSnapshot, GameError> {
        let handle = self.registry.get(session_id).await?;
        let session = handle.lock().await;
        Ok(session.snapshot())
    }

    pub async fn reset_session(&self, session_id: &SessionId) -> Result<GameSnapshot, GameError> {
        let handle = self.registry.get(session_id).await?;
        let mut session = handle.lock().await;
        session.reset();
        Ok(session.snapshot())
    }

    pub async fn change_difficulty(
        &self,
        session_id: &SessionId,
        difficulty: Difficulty,
    ) -> Result<GameSnapshot, GameError> {
        let handle = self.registry.get(session_id).await?;
        let mut session = handle.lock().await;
        session.change_difficulty(difficulty);
        Ok(session.snapshot())
    }

    pub async fn get_aggregate_stats(&self) -> AggregateStats {
        self.registry.aggregate_stats().await
    }
}
