use std::fmt;

use serde::{Deserialize, Serialize};

/// Side of the game. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the opposite color.
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// Content of one board cell.
///
/// `Hint` never appears inside a [`crate::board::Board`]; it only marks legal
/// destinations in grids handed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Black,
    White,
    Hint,
}

impl CellState {
    pub fn for_color(color: Color) -> Self {
        match color {
            Color::Black => CellState::Black,
            Color::White => CellState::White,
        }
    }

    /// Stone owner, `None` for empty and hint cells.
    pub fn color(self) -> Option<Color> {
        match self {
            CellState::Black => Some(Color::Black),
            CellState::White => Some(Color::White),
            CellState::Empty | CellState::Hint => None,
        }
    }

    /// Flips a stone. Empty and hint cells are returned unchanged.
    pub fn other(self) -> Self {
        match self {
            CellState::Black => CellState::White,
            CellState::White => CellState::Black,
            state => state,
        }
    }

    pub fn ascii(self) -> char {
        match self {
            CellState::Empty => '-',
            CellState::Black => 'X',
            CellState::White => 'O',
            CellState::Hint => '.',
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < 8 && self.col < 8
    }
}

/// One ply: a stone placement or a forced pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    Place { color: Color, pos: Position },
    Skip { color: Color },
}

impl Move {
    pub fn place(color: Color, row: u8, col: u8) -> Self {
        Move::Place {
            color,
            pos: Position::new(row, col),
        }
    }

    pub fn skip(color: Color) -> Self {
        Move::Skip { color }
    }

    pub fn color(&self) -> Color {
        match *self {
            Move::Place { color, .. } | Move::Skip { color } => color,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match *self {
            Move::Place { pos, .. } => Some(pos),
            Move::Skip { .. } => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Move::Skip { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { color, pos } => write!(f, "{color} {}, {}", pos.row, pos.col),
            Move::Skip { color } => write!(f, "{color} skipped"),
        }
    }
}

/// Stone counts plus the side to move; `next_to_move == None` means the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
    pub next_to_move: Option<Color>,
}

impl Score {
    /// Color with more stones, `None` on a tie.
    pub fn winning_color(&self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn finished(&self) -> bool {
        self.next_to_move.is_none()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B-W:{}-{}", self.black, self.white)?;
        if self.finished() {
            match self.winning_color() {
                Some(Color::Black) => f.write_str(", Black wins!")?,
                Some(Color::White) => f.write_str(", White wins!")?,
                None => f.write_str(", Draw!")?,
            }
        }
        Ok(())
    }
}

/// Public game state returned from session and WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 64 entries.
    pub board: Vec<CellState>,
    pub next_to_move: Option<Color>,
    pub human: Color,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a placement or nothing was played yet.
    pub is_pass: bool,
    /// Contract:
    /// - Placement: cells turned over by it.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
    pub last_move: Option<Move>,
    /// Search score recorded by the AI on its last move.
    pub ai_score: Option<i32>,
}

/// A legal destination annotated with its search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub pos: Position,
    pub score: i32,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub black_count: u8,
    pub white_count: u8,
}

impl From<Score> for GameResult {
    fn from(score: Score) -> Self {
        Self {
            winner: score.winning_color(),
            black_count: score.black,
            white_count: score.white,
        }
    }
}
