use super::board::Board;
use super::evaluator::{self, WIN_SCORE};
use super::types::{Cell, Move, Symbol};

/// Minimax with alpha-beta pruning, always from the AI's point of view:
/// the AI maximizes, its opponent minimizes.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    ai_symbol: Symbol,
    nodes_evaluated: u64,
}

impl SearchEngine {
    pub fn new(ai_symbol: Symbol) -> Self {
        Self {
            ai_symbol,
            nodes_evaluated: 0,
        }
    }

    pub fn ai_symbol(&self) -> Symbol {
        self.ai_symbol
    }

    /// Positions visited by the most recent move selection.
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    pub fn reset_node_count(&mut self) {
        self.nodes_evaluated = 0;
    }

    /// Optimal move for the AI, or `None` when no cell is empty.
    ///
    /// Candidates are tried row-major and only a strictly better score
    /// replaces the current pick, so ties go to the first cell enumerated.
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.nodes_evaluated = 0;

        let mut scratch = *board;
        let mut best: Option<(Move, i32)> = None;

        for mv in board.empty_cells() {
            scratch.set(mv, Cell::Taken(self.ai_symbol));
            let score = self.best_score(&mut scratch, 1, false, i32::MIN, i32::MAX);
            scratch.set(mv, Cell::Empty);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Minimax value of `board` with `depth` plies already played.
    ///
    /// Wins are worth `WIN_SCORE - depth` and losses `-WIN_SCORE + depth`,
    /// so the AI prefers quick wins and slow losses. Every recursive call
    /// fills one empty cell and clears it again before returning.
    pub fn best_score(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_evaluated += 1;

        let score = evaluator::score(board, self.ai_symbol);
        if score == WIN_SCORE {
            return WIN_SCORE - depth;
        }
        if score == -WIN_SCORE {
            return -WIN_SCORE + depth;
        }
        if evaluator::is_full(board) {
            return 0;
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in board.empty_cells() {
                board.set(mv, Cell::Taken(self.ai_symbol));
                let eval = self.best_score(board, depth + 1, false, alpha, beta);
                board.set(mv, Cell::Empty);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let opponent = self.ai_symbol.opponent();
            let mut min_eval = i32::MAX;
            for mv in board.empty_cells() {
                board.set(mv, Cell::Taken(opponent));
                let eval = self.best_score(board, depth + 1, true, alpha, beta);
                board.set(mv, Cell::Empty);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}
