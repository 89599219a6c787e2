use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::board::BOARD_SIZE;
use crate::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol that opens every game, whoever holds it.
    pub const FIRST: Symbol = Symbol::X;

    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Symbol::X),
            "O" | "o" => Ok(Symbol::O),
            other => Err(GameError::InvalidSymbol(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Symbol),
}

impl Cell {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Taken(symbol) => Some(symbol),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Empty cells go on the wire as `""`, taken ones as `"X"` / `"O"`.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Taken(symbol) => serializer.serialize_str(symbol.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Checks raw client coordinates, which may be negative or off the board.
    pub fn from_coords(row: i64, col: i64) -> Result<Move, GameError> {
        let off_board = || GameError::IllegalMove { row, col };
        let mv = Move::new(
            usize::try_from(row).map_err(|_| off_board())?,
            usize::try_from(col).map_err(|_| off_board())?,
        );
        if mv.is_on_board() {
            Ok(mv)
        } else {
            Err(off_board())
        }
    }

    /// Coordinates as reported in errors.
    pub fn coords(self) -> (i64, i64) {
        let signed = |index: usize| i64::try_from(index).unwrap_or(i64::MAX);
        (signed(self.row), signed(self.col))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Game result derived from a board; never stored on the board itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "winner", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Win(Symbol),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Symbol> {
        match self {
            Outcome::Win(symbol) => Some(symbol),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent().opponent(), Symbol::O);
        assert_eq!(Symbol::FIRST, Symbol::X);
    }

    #[test]
    fn symbol_parsing_is_case_insensitive() {
        assert_eq!("x".parse::<Symbol>().unwrap(), Symbol::X);
        assert_eq!(" O ".parse::<Symbol>().unwrap(), Symbol::O);
        assert_eq!(
            "Z".parse::<Symbol>(),
            Err(GameError::InvalidSymbol("Z".to_string()))
        );
    }

    #[test]
    fn cells_serialize_as_plain_strings() {
        let cells = [Cell::Empty, Cell::Taken(Symbol::X), Cell::Taken(Symbol::O)];
        assert_eq!(serde_json::to_string(&cells).unwrap(), r#"["","X","O"]"#);
    }

    #[test]
    fn outcome_wire_shape() {
        assert_eq!(
            serde_json::to_string(&Outcome::Win(Symbol::O)).unwrap(),
            r#"{"kind":"win","winner":"O"}"#
        );
        assert_eq!(
            serde_json::to_string(&Outcome::Draw).unwrap(),
            r#"{"kind":"draw"}"#
        );
    }

    #[test]
    fn move_bounds() {
        assert!(Move::new(2, 2).is_on_board());
        assert!(!Move::new(3, 0).is_on_board());
        assert!(!Move::new(0, 3).is_on_board());
    }

    #[test]
    fn client_coordinates_are_checked() {
        assert_eq!(Move::from_coords(2, 0), Ok(Move::new(2, 0)));
        assert_eq!(
            Move::from_coords(-1, 0),
            Err(GameError::IllegalMove { row: -1, col: 0 })
        );
        assert_eq!(
            Move::from_coords(1, 3),
            Err(GameError::IllegalMove { row: 1, col: 3 })
        );
        assert_eq!(
            Move::from_coords(i64::MIN, i64::MAX),
            Err(GameError::IllegalMove {
                row: i64::MIN,
                col: i64::MAX
            })
        );
    }
}
