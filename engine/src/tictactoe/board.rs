use std::fmt;
use std::str::FromStr;

use super::types::{Cell, Move, Symbol};
use crate::GameError;

pub const BOARD_SIZE: usize = 3;

/// The 3×3 grid. Plain `Copy` data: the search mutates one board in place
/// and restores every cell it touches before returning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// `None` when the move is off the board.
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        self.cells.get(mv.row)?.get(mv.col).copied()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        mv.is_on_board() && self.cells[mv.row][mv.col] == Cell::Empty
    }

    pub fn place(&mut self, mv: Move, symbol: Symbol) -> Result<(), GameError> {
        if !self.is_legal(mv) {
            let (row, col) = mv.coords();
            return Err(GameError::IllegalMove { row, col });
        }
        self.cells[mv.row][mv.col] = Cell::Taken(symbol);
        Ok(())
    }

    /// Unchecked write used by the search's place/undo loop.
    pub(crate) fn set(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.row][mv.col] = cell;
    }

    pub fn clear(&mut self) {
        self.cells = Default::default();
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_empty()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---------")?;
            }
            let rendered: Vec<&str> = cells
                .iter()
                .map(|cell| cell.symbol().map_or("·", Symbol::as_str))
                .collect();
            write!(f, "{}", rendered.join(" | "))?;
        }
        Ok(())
    }
}

/// Parses nine cells written with `X`, `O` and `.`/`_` for empty.
/// Whitespace and `|` separators are ignored, so `"XO. / ..."`-style
/// layouts spread over three lines read naturally in tests.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Taken(Symbol::X),
                'O' | 'o' => Cell::Taken(Symbol::O),
                '.' | '_' => Cell::Empty,
                c if c.is_whitespace() || c == '|' => continue,
                other => {
                    return Err(GameError::InvalidBoard(format!(
                        "unexpected character '{}'",
                        other
                    )));
                }
            };
            cells.push(cell);
        }

        if cells.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} cells, got {}",
                BOARD_SIZE * BOARD_SIZE,
                cells.len()
            )));
        }

        let mut board = Board::new();
        for (index, cell) in cells.into_iter().enumerate() {
            board.set(Move::new(index / BOARD_SIZE, index % BOARD_SIZE), cell);
        }
        Ok(board)
    }
}
