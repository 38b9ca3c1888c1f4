use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::Instant;

use crate::ai::weights::{WeightMatrix, Weights};
use crate::board::Board;
use crate::error::{OthelloError, Result};
use crate::types::{CellState, Color, Move};

/// Evaluation of a finished game for the winner.
pub const WIN_SCORE: i32 = 999;
/// Unbounded alpha/beta sentinel. `-INFINITY` is still representable.
pub const INFINITY: i32 = i32::MAX;

const DEFAULT_DEPTH: u32 = 3;
const DEFAULT_HINT_DEPTH: u32 = 3;

/// Score of a searched node, from the perspective of the side it was searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegamaxResult {
    pub score: i32,
    pub mv: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Engine settings. Every field has a default, so partial configs deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Color the AI plays.
    pub color: Color,
    pub depth: u32,
    /// `None` uses the built-in corner preference matrix.
    pub weights: Option<Weights>,
    /// Depth used when scoring moves for hints.
    pub hint_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color: Color::White,
            depth: DEFAULT_DEPTH,
            weights: None,
            hint_depth: DEFAULT_HINT_DEPTH,
        }
    }
}

/// Fixed-depth negamax player with alpha-beta pruning and a positional evaluator.
#[derive(Debug, Clone)]
pub struct NegamaxPlayer {
    color: Color,
    depth: u32,
    weights: WeightMatrix,
    last_score: Option<i32>,
}

impl NegamaxPlayer {
    pub fn new(color: Color, depth: u32) -> Result<Self> {
        Self::with_weights(color, depth, WeightMatrix::default())
    }

    pub fn with_weights(color: Color, depth: u32, weights: WeightMatrix) -> Result<Self> {
        if depth == 0 {
            return Err(OthelloError::InvalidDepth);
        }
        Ok(Self {
            color,
            depth,
            weights,
            last_score: None,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let weights = config
            .weights
            .as_ref()
            .map(Weights::to_matrix)
            .unwrap_or_default();
        Self::with_weights(config.color, config.depth, weights)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Score recorded by the last [`NegamaxPlayer::next_move`] call.
    pub fn last_score(&self) -> Option<i32> {
        self.last_score
    }

    pub(crate) fn reset_last_score(&mut self) {
        self.last_score = None;
    }

    /// Static evaluation from `color`'s point of view.
    ///
    /// Finished games score `WIN_SCORE`, `-WIN_SCORE` or 0; otherwise the
    /// weights under `color`'s stones minus those under the opponent's.
    pub fn evaluate(&self, board: &Board, color: Color) -> i32 {
        if board.finished() {
            return match board.score().winning_color() {
                None => 0,
                Some(winner) if winner == color => WIN_SCORE,
                Some(_) => -WIN_SCORE,
            };
        }
        self.evaluate_heuristic(board, color)
    }

    fn evaluate_heuristic(&self, board: &Board, color: Color) -> i32 {
        let mine = CellState::for_color(color);
        let theirs = mine.other();
        let mut score = 0;

        for (cells, weights) in board.grid().iter().zip(self.weights.rows().iter()) {
            for (&cell, &weight) in cells.iter().zip(weights.iter()) {
                if cell == mine {
                    score += weight;
                } else if cell == theirs {
                    score -= weight;
                }
            }
        }

        score
    }

    /// Fail-soft negamax. Pass `-INFINITY`/`INFINITY` for an open window;
    /// bounds outside that range are clamped to it.
    pub fn negamax(&self, board: &Board, depth: u32, alpha: i32, beta: i32, color: Color) -> NegamaxResult {
        let mut stats = SearchStats::default();
        self.negamax_with_stats(board, depth, alpha, beta, color, &mut stats)
    }

    pub fn negamax_with_stats(
        &self,
        board: &Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        color: Color,
        stats: &mut SearchStats,
    ) -> NegamaxResult {
        stats.nodes += 1;

        if depth == 0 || board.finished() {
            return self.leaf(board, color);
        }

        let mut moves = board.valid_moves();
        if moves.is_empty() {
            return self.leaf(board, color);
        }
        // Stable sort: equal weights keep generation order.
        moves.sort_by_key(|mv| Reverse(self.move_weight(mv)));

        let mut alpha = alpha.max(-INFINITY);
        let beta = beta.min(INFINITY);
        let mut best: Option<(i32, Move)> = None;

        for mv in moves {
            let child = board.apply_unchecked(mv);
            let score = -self
                .negamax_with_stats(&child, depth - 1, -beta, -alpha, color.other(), stats)
                .score;

            if best.is_none_or(|(value, _)| score > value) {
                best = Some((score, mv));
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                stats.cutoffs += 1;
                break;
            }
        }

        match best {
            Some((score, mv)) => NegamaxResult { score, mv: Some(mv) },
            None => self.leaf(board, color),
        }
    }

    /// Searches the position for the side to move and records the score.
    /// Fails with `GameOver` on a finished board.
    pub fn next_move(&mut self, board: &Board) -> Result<Move> {
        let Some(color) = board.next_to_move() else {
            return Err(OthelloError::GameOver);
        };

        let started = Instant::now();
        let mut stats = SearchStats::default();
        let result = self.negamax_with_stats(board, self.depth, -INFINITY, INFINITY, color, &mut stats);
        self.last_score = Some(result.score);

        let mv = result.mv.ok_or(OthelloError::NoLegalMoves)?;
        debug!(
            %color,
            %mv,
            score = result.score,
            depth = self.depth,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "negamax search finished"
        );
        Ok(mv)
    }

    /// Scores every legal move for hint display, in `valid_moves()` order.
    pub fn score_moves(&self, board: &Board) -> Vec<NegamaxResult> {
        let Some(color) = board.next_to_move() else {
            return Vec::new();
        };

        board
            .valid_moves()
            .into_iter()
            .map(|mv| {
                let child = board.apply_unchecked(mv);
                let reply = self.negamax(&child, self.depth, -INFINITY, INFINITY, color.other());
                NegamaxResult {
                    score: -reply.score,
                    mv: Some(mv),
                }
            })
            .collect()
    }

    fn leaf(&self, board: &Board, color: Color) -> NegamaxResult {
        NegamaxResult {
            score: self.evaluate(board, color),
            mv: None,
        }
    }

    fn move_weight(&self, mv: &Move) -> i32 {
        mv.position().map_or(0, |pos| self.weights.get(pos))
    }
}
