use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::snapshot::{GameSnapshot, SessionStats, WinningLine};
use super::statistics::{GameResult, GameStatistics};
use crate::tictactoe::evaluator;
use crate::tictactoe::{Board, Difficulty, Move, Outcome, SearchEngine, Symbol};
use crate::{GameError, SessionId, SessionRng, StateViolation, log};

/// Where a session stands. Derived from the session fields on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The AI holds the opening symbol and nothing has been played yet.
    AwaitingFirstMove,
    AwaitingHuman,
    AwaitingAi,
    Finished(Outcome),
}

/// One game between a human and the AI.
///
/// The opening symbol moves first whoever holds it. Every finished game is
/// reported to the shared [`GameStatistics`] exactly once, at the moment it
/// finishes; [`GameSession::reset`] starts a new game without touching them.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    board: Board,
    human_symbol: Symbol,
    ai_symbol: Symbol,
    current_turn: Symbol,
    difficulty: Difficulty,
    moves_count: u32,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
    outcome: Option<Outcome>,
    last_ai_move: Option<Move>,
    engine: SearchEngine,
    rng: SessionRng,
    statistics: Arc<GameStatistics>,
}

impl GameSession {
    pub fn new(
        id: SessionId,
        difficulty: Difficulty,
        human_symbol: Symbol,
        rng: SessionRng,
        statistics: Arc<GameStatistics>,
    ) -> Self {
        let ai_symbol = human_symbol.opponent();
        Self {
            id,
            board: Board::new(),
            human_symbol,
            ai_symbol,
            current_turn: Symbol::FIRST,
            difficulty,
            moves_count: 0,
            started_at: Local::now(),
            finished_at: None,
            outcome: None,
            last_ai_move: None,
            engine: SearchEngine::new(ai_symbol),
            rng,
            statistics,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human_symbol(&self) -> Symbol {
        self.human_symbol
    }

    pub fn ai_symbol(&self) -> Symbol {
        self.ai_symbol
    }

    pub fn current_turn(&self) -> Symbol {
        self.current_turn
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn moves_count(&self) -> u32 {
        self.moves_count
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn ai_moves_first(&self) -> bool {
        self.ai_symbol == Symbol::FIRST
    }

    pub fn phase(&self) -> SessionPhase {
        match self.outcome {
            Some(outcome) => SessionPhase::Finished(outcome),
            None if self.current_turn == self.human_symbol => SessionPhase::AwaitingHuman,
            None if self.moves_count == 0 => SessionPhase::AwaitingFirstMove,
            None => SessionPhase::AwaitingAi,
        }
    }

    /// Places the human's symbol and re-evaluates the board.
    pub fn apply_human_move(&mut self, mv: Move) -> Result<Outcome, GameError> {
        self.ensure_turn(self.human_symbol, StateViolation::NotHumanTurn)?;
        self.board.place(mv, self.human_symbol)?;
        Ok(self.complete_turn())
    }

    /// Lets the difficulty policy pick and play the AI's move.
    pub fn apply_ai_move(&mut self) -> Result<Move, GameError> {
        self.ensure_turn(self.ai_symbol, StateViolation::NotAiTurn)?;

        let mv = self
            .difficulty
            .policy()
            .select_move(&self.board, &mut self.engine, &mut self.rng)
            .ok_or(StateViolation::NoMovesLeft)?;
        self.board.place(mv, self.ai_symbol)?;
        self.last_ai_move = Some(mv);
        self.complete_turn();
        Ok(mv)
    }

    /// Starts over with an empty board, keeping the id and difficulty.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_turn = Symbol::FIRST;
        self.moves_count = 0;
        self.started_at = Local::now();
        self.finished_at = None;
        self.outcome = None;
        self.last_ai_move = None;
        self.engine.reset_node_count();

        log!("[game:{}] reset", self.id);
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        log!("[game:{}] difficulty changed to {}", self.id, difficulty);
        self.reset();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let report = evaluator::status(&self.board, self.ai_symbol, self.human_symbol);
        let session_stats = self.finished_at.map(|finished_at| SessionStats {
            moves_count: self.moves_count,
            duration_seconds: elapsed_seconds(self.started_at, finished_at),
            difficulty: self.difficulty,
            nodes_evaluated: self.engine.nodes_evaluated(),
        });

        GameSnapshot {
            game_id: self.id.clone(),
            board: *self.board.rows(),
            current_player: self.current_turn,
            human_symbol: self.human_symbol,
            ai_symbol: self.ai_symbol,
            difficulty: self.difficulty,
            phase: self.phase(),
            game_over: self.is_finished(),
            winner: self.outcome.and_then(Outcome::winner),
            winning_line: evaluator::winning_line(&self.board)
                .map(|(symbol, cells)| WinningLine { symbol, cells }),
            moves_count: self.moves_count,
            message: report.message,
            last_ai_move: self.last_ai_move,
            nodes_evaluated: self.engine.nodes_evaluated(),
            session_stats,
            analysis: evaluator::analyze(&self.board, self.ai_symbol, self.human_symbol),
        }
    }

    fn ensure_turn(&self, symbol: Symbol, violation: StateViolation) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(StateViolation::GameOver.into());
        }
        if self.current_turn != symbol {
            return Err(violation.into());
        }
        Ok(())
    }

    fn complete_turn(&mut self) -> Outcome {
        self.moves_count += 1;

        let outcome = evaluator::status(&self.board, self.ai_symbol, self.human_symbol).outcome;
        let result = match outcome {
            Outcome::Ongoing => {
                self.current_turn = self.current_turn.opponent();
                return outcome;
            }
            Outcome::Win(symbol) if symbol == self.human_symbol => GameResult::HumanWin,
            Outcome::Win(_) => GameResult::AiWin,
            Outcome::Draw => GameResult::Draw,
        };

        self.outcome = Some(outcome);
        self.finished_at = Some(Local::now());
        self.statistics.record_game(result, self.moves_count);

        log!(
            "[game:{}] finished: {:?} after {} moves ({})",
            self.id,
            result,
            self.moves_count,
            self.difficulty
        );
        outcome
    }

    /// Plays a scripted AI move, bypassing the difficulty policy.
    #[cfg(test)]
    fn force_ai_move(&mut self, mv: Move) -> Result<Outcome, GameError> {
        self.ensure_turn(self.ai_symbol, StateViolation::NotAiTurn)?;
        self.board.place(mv, self.ai_symbol)?;
        self.last_ai_move = Some(mv);
        Ok(self.complete_turn())
    }
}

fn elapsed_seconds(start: DateTime<Local>, end: DateTime<Local>) -> f64 {
    let millis = (end - start).num_milliseconds() as f64;
    (millis / 10.0).round() / 100.0
}
