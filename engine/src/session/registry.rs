use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::game_session::GameSession;
use super::statistics::{AggregateStats, GameStatistics};
use crate::config::Validate;
use crate::id_generator::generate_session_id;
use crate::tictactoe::{Difficulty, Symbol};
use crate::{ConfigError, GameError, SessionId, SessionRng, log, log_debug};

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_EVICTION_BATCH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Live sessions allowed before the oldest ones are evicted.
    pub capacity: usize,
    pub eviction_batch: usize,
    /// Seeds every session's RNG when set; OS entropy otherwise.
    pub rng_seed: Option<u64>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            eviction_batch: DEFAULT_EVICTION_BATCH,
            rng_seed: None,
        }
    }
}

impl Validate for RegistrySettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".to_string()));
        }
        if self.eviction_batch == 0 || self.eviction_batch > self.capacity {
            return Err(ConfigError::Invalid(format!(
                "eviction_batch must be between 1 and capacity ({}), got {}",
                self.capacity, self.eviction_batch
            )));
        }
        Ok(())
    }
}

pub type SessionHandle = Arc<Mutex<GameSession>>;

#[derive(Debug)]
struct RegistryState {
    sessions: HashMap<SessionId, SessionHandle>,
    insertion_order: VecDeque<SessionId>,
    seed_source: SessionRng,
}

/// Owns every live session and the statistics they report into.
///
/// The map lock is held only to look sessions up or insert them; moves run
/// under the per-session lock so different games never block each other.
/// Once the registry grows past its capacity the oldest sessions by creation
/// time are dropped in one batch, whether finished or not.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    state: Arc<Mutex<RegistryState>>,
    statistics: Arc<GameStatistics>,
    settings: RegistrySettings,
}

impl SessionRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        let seed_source = match settings.rng_seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };

        Self {
            state: Arc::new(Mutex::new(RegistryState {
                sessions: HashMap::new(),
                insertion_order: VecDeque::new(),
                seed_source,
            })),
            statistics: Arc::new(GameStatistics::new()),
            settings,
        }
    }

    pub async fn create(
        &self,
        difficulty: Difficulty,
        human_symbol: Symbol,
    ) -> (SessionId, SessionHandle) {
        let mut state = self.state.lock().await;

        let mut id = generate_session_id(&mut state.seed_source);
        while state.sessions.contains_key(&id) {
            id = generate_session_id(&mut state.seed_source);
        }

        let rng = SessionRng::new(state.seed_source.random());
        let seed = rng.seed();
        let session = GameSession::new(
            id.clone(),
            difficulty,
            human_symbol,
            rng,
            self.statistics.clone(),
        );
        let handle = Arc::new(Mutex::new(session));

        state.sessions.insert(id.clone(), handle.clone());
        state.insertion_order.push_back(id.clone());
        log!(
            "[game:{}] created: human {} vs AI {} ({})",
            id,
            human_symbol,
            human_symbol.opponent(),
            difficulty
        );
        log_debug!("[game:{}] rng seed {}", id, seed);

        let evicted = evict_if_over_capacity(&mut state, &self.settings);
        if evicted > 0 {
            log!(
                "Evicted {} oldest sessions, {} remain",
                evicted,
                state.sessions.len()
            );
        }

        (id, handle)
    }

    pub async fn get(&self, id: &SessionId) -> Result<SessionHandle, GameError> {
        let state = self.state.lock().await;
        state
            .sessions
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    pub async fn remove(&self, id: &SessionId) -> Option<SessionHandle> {
        let mut state = self.state.lock().await;
        let removed = state.sessions.remove(id)?;
        state.insertion_order.retain(|existing| existing != id);
        Some(removed)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn aggregate_stats(&self) -> AggregateStats {
        let active_games = self.len().await;
        self.statistics.summary(active_games)
    }
}

fn evict_if_over_capacity(state: &mut RegistryState, settings: &RegistrySettings) -> usize {
    if state.sessions.len() <= settings.capacity {
        return 0;
    }

    let count = settings.eviction_batch.min(state.insertion_order.len());
    for id in state.insertion_order.drain(..count) {
        state.sessions.remove(&id);
    }
    count
}
