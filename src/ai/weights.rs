use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::types::Position;

const CORNER_SIZE: usize = BOARD_SIZE / 2;

pub type Corner = [[i32; CORNER_SIZE]; CORNER_SIZE];

/// Top-left quarter of the default matrix: corners high, X-squares negative.
pub const DEFAULT_CORNER: Corner = [
    [20, 5, 5, 5],
    [5, -2, -1, -1],
    [5, -1, 0, 0],
    [5, -1, 0, 0],
];

static DEFAULT_WEIGHTS: Lazy<WeightMatrix> = Lazy::new(|| WeightMatrix::from_corner(DEFAULT_CORNER));

/// Where an engine's weights come from in an [`crate::ai::EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weights {
    /// A quarter board mirrored into all four quadrants.
    Corner(Corner),
    Full([[i32; BOARD_SIZE]; BOARD_SIZE]),
}

impl Weights {
    pub fn to_matrix(&self) -> WeightMatrix {
        match self {
            Weights::Corner(corner) => WeightMatrix::from_corner(*corner),
            Weights::Full(cells) => WeightMatrix::new(*cells),
        }
    }
}

/// Positional value of each cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightMatrix {
    cells: [[i32; BOARD_SIZE]; BOARD_SIZE],
}

impl WeightMatrix {
    pub fn new(cells: [[i32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Mirrors `corner` horizontally, then the resulting top half vertically.
    pub fn from_corner(corner: Corner) -> Self {
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, corner_row) in corner.iter().enumerate() {
            for (col, &weight) in corner_row.iter().enumerate() {
                let mirror_row = BOARD_SIZE - 1 - row;
                let mirror_col = BOARD_SIZE - 1 - col;
                cells[row][col] = weight;
                cells[row][mirror_col] = weight;
                cells[mirror_row][col] = weight;
                cells[mirror_row][mirror_col] = weight;
            }
        }
        Self { cells }
    }

    pub fn get(&self, pos: Position) -> i32 {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn rows(&self) -> &[[i32; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

impl Default for WeightMatrix {
    fn default() -> Self {
        DEFAULT_WEIGHTS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matrix_mirrors_the_corner_block() {
        let weights = WeightMatrix::default();
        let rows = weights.rows();

        assert_eq!(rows[0], [20, 5, 5, 5, 5, 5, 5, 20]);
        assert_eq!(rows[1], [5, -2, -1, -1, -1, -1, -2, 5]);
        assert_eq!(rows[3], [5, -1, 0, 0, 0, 0, -1, 5]);
        assert_eq!(rows[4], rows[3]);
        assert_eq!(rows[7], rows[0]);
    }

    #[test]
    fn mirrored_matrix_has_fourfold_corner_symmetry() {
        let corner = [[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]];
        let weights = WeightMatrix::from_corner(corner);

        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let value = weights.get(Position::new(row, col));
                assert_eq!(value, weights.get(Position::new(7 - row, col)));
                assert_eq!(value, weights.get(Position::new(row, 7 - col)));
                assert_eq!(value, weights.get(Position::new(7 - row, 7 - col)));
            }
        }
        assert_eq!(weights.get(Position::new(0, 0)), 1);
        assert_eq!(weights.get(Position::new(3, 3)), 16);
    }

    #[test]
    fn full_weights_are_taken_verbatim() {
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        cells[2][6] = 9;
        let weights = Weights::Full(cells).to_matrix();

        assert_eq!(weights.get(Position::new(2, 6)), 9);
        assert_eq!(weights.get(Position::new(2, 1)), 0);
    }
}
