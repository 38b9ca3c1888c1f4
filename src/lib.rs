//! Othello (Reversi) engine: an array-backed board with Othello's flip rule
//! and a fixed-depth negamax player with alpha-beta pruning.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{EngineConfig, NegamaxPlayer, NegamaxResult};
pub use board::Board;
pub use error::OthelloError;
pub use game::{FirstMovePlayer, Game, GameSession, Player};
pub use types::{CellState, Color, GameResult, GameState, Hint, Move, Position, Score};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
