use thiserror::Error;

use crate::types::{Color, Move};

/// Errors surfaced by the board, the search engine and the game drivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OthelloError {
    /// The move is not among the legal moves of the position.
    #[error("invalid move: {0}")]
    InvalidMove(Move),

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    /// The color to move has nothing to play.
    #[error("no legal moves")]
    NoLegalMoves,

    #[error("game is already over")]
    GameOver,

    /// The caller tried to act while the other side owns the turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),

    #[error("both players are {0}")]
    DuplicateColor(Color),

    #[error("search depth must be positive")]
    InvalidDepth,
}

pub type Result<T> = std::result::Result<T, OthelloError>;
