//! Static evaluation of a board: win-line detection, fullness, outcome.

use serde::Serialize;

use super::board::{BOARD_SIZE, Board};
use super::types::{Cell, Move, Outcome, Symbol};

/// Score of a completed line. Larger than any depth adjustment the search
/// applies, so a win always outranks a draw.
pub const WIN_SCORE: i32 = 10;

const LINES: [[Move; 3]; 8] = [
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

/// First completed line in scan order (rows, columns, diagonals).
pub fn winning_line(board: &Board) -> Option<(Symbol, [Move; 3])> {
    LINES.iter().find_map(|line| {
        let symbol = board.cell(line[0])?.symbol()?;
        line[1..]
            .iter()
            .all(|&mv| board.cell(mv) == Some(Cell::Taken(symbol)))
            .then_some((symbol, *line))
    })
}

pub fn winner(board: &Board) -> Option<Symbol> {
    winning_line(board).map(|(symbol, _)| symbol)
}

/// `+WIN_SCORE` if `perspective` owns a completed line, `-WIN_SCORE` if the
/// opponent does, `0` otherwise.
pub fn score(board: &Board, perspective: Symbol) -> i32 {
    match winner(board) {
        Some(symbol) if symbol == perspective => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

pub fn is_full(board: &Board) -> bool {
    board.empty_count() == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub outcome: Outcome,
    pub message: &'static str,
}

pub fn status(board: &Board, ai_symbol: Symbol, human_symbol: Symbol) -> StatusReport {
    let score = score(board, ai_symbol);
    if score == WIN_SCORE {
        StatusReport {
            outcome: Outcome::Win(ai_symbol),
            message: "AI wins!",
        }
    } else if score == -WIN_SCORE {
        StatusReport {
            outcome: Outcome::Win(human_symbol),
            message: "You win!",
        }
    } else if is_full(board) {
        StatusReport {
            outcome: Outcome::Draw,
            message: "It's a draw!",
        }
    } else {
        StatusReport {
            outcome: Outcome::Ongoing,
            message: "Game in progress",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAnalysis {
    pub empty_cells: usize,
    /// Percentage of the board already filled.
    pub game_progress: f64,
    pub evaluation: i32,
    pub insight: Option<&'static str>,
}

pub fn analyze(board: &Board, ai_symbol: Symbol, human_symbol: Symbol) -> PositionAnalysis {
    let total = BOARD_SIZE * BOARD_SIZE;
    let empty_cells = board.empty_count();
    let report = status(board, ai_symbol, human_symbol);

    let insight = if report.outcome.is_terminal() {
        None
    } else if empty_cells == total {
        Some("Game just started. Center or corner moves are typically best.")
    } else if empty_cells > 6 {
        Some("Early game. Focus on controlling the center and corners.")
    } else if empty_cells > 3 {
        Some("Mid-game. Look for winning opportunities and block opponent threats.")
    } else {
        Some("End-game. Every move is critical!")
    };

    PositionAnalysis {
        empty_cells,
        game_progress: (total - empty_cells) as f64 / total as f64 * 100.0,
        evaluation: score(board, ai_symbol),
        insight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionRng;

    fn board(layout: &str) -> Board {
        layout.parse().unwrap()
    }

    #[test]
    fn detects_every_line_kind() {
        assert_eq!(winner(&board("XXX OO. ...")), Some(Symbol::X));
        assert_eq!(winner(&board("XX. XO. .O.")), None);
        assert_eq!(winner(&board("OX. OX. O..")), Some(Symbol::O));
        assert_eq!(winner(&board("X.O .XO ..X")), Some(Symbol::X));
        assert_eq!(winner(&board("X.O XO. O..")), Some(Symbol::O));
    }

    #[test]
    fn winning_line_reports_cells() {
        let (symbol, line) = winning_line(&board("X.O XO. O.X")).unwrap();
        assert_eq!(symbol, Symbol::O);
        assert_eq!(line, [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)]);
    }

    #[test]
    fn score_is_relative_to_perspective() {
        let won = board("OOO XX. X..");
        assert_eq!(score(&won, Symbol::O), WIN_SCORE);
        assert_eq!(score(&won, Symbol::X), -WIN_SCORE);
        assert_eq!(score(&board("XO. ... ..."), Symbol::X), 0);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let drawn = board("XOX XOO OXX");
        assert!(is_full(&drawn));
        let report = status(&drawn, Symbol::O, Symbol::X);
        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(report.message, "It's a draw!");
    }

    #[test]
    fn win_on_last_cell_is_a_win_not_a_draw() {
        let report = status(&board("XOX OXO OXX"), Symbol::O, Symbol::X);
        assert_eq!(report.outcome, Outcome::Win(Symbol::X));
        assert_eq!(report.message, "You win!");
    }

    #[test]
    fn status_names_the_ai_win() {
        let report = status(&board("XX. OOO X.."), Symbol::O, Symbol::X);
        assert_eq!(report.outcome, Outcome::Win(Symbol::O));
        assert_eq!(report.message, "AI wins!");
    }

    #[test]
    fn status_is_exactly_one_outcome_on_random_playouts() {
        let mut rng = SessionRng::new(2024);
        for _ in 0..500 {
            let mut current = Board::new();
            let mut mover = Symbol::FIRST;
            loop {
                let report = status(&current, Symbol::O, Symbol::X);
                let is_win = matches!(report.outcome, Outcome::Win(_));
                let is_draw = report.outcome == Outcome::Draw;
                let is_ongoing = report.outcome == Outcome::Ongoing;
                assert_eq!(
                    [is_win, is_draw, is_ongoing].iter().filter(|&&b| b).count(),
                    1
                );
                assert_eq!(is_win, winner(&current).is_some());
                assert_eq!(is_draw, winner(&current).is_none() && is_full(&current));
                if report.outcome.is_terminal() {
                    break;
                }
                let moves = current.empty_cells();
                let mv = *rng.choose(&moves).unwrap();
                current.place(mv, mover).unwrap();
                mover = mover.opponent();
            }
        }
    }

    #[test]
    fn analysis_tracks_progress_and_phase() {
        let opening = analyze(&Board::new(), Symbol::O, Symbol::X);
        assert_eq!(opening.empty_cells, 9);
        assert_eq!(opening.game_progress, 0.0);
        assert!(opening.insight.unwrap().starts_with("Game just started"));

        let early = analyze(&board("X.. .O. ..."), Symbol::O, Symbol::X);
        assert!(early.insight.unwrap().starts_with("Early game"));

        let mid = analyze(&board("XO. .OX ..X"), Symbol::O, Symbol::X);
        assert!(mid.insight.unwrap().starts_with("Mid-game"));

        let end = analyze(&board("XOX XOO .X."), Symbol::O, Symbol::X);
        assert!(end.insight.unwrap().starts_with("End-game"));

        let over = analyze(&board("OOO XX. X.."), Symbol::O, Symbol::X);
        assert_eq!(over.insight, None);
        assert_eq!(over.evaluation, WIN_SCORE);
    }
}
