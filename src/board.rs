use std::fmt;
use std::ops::Index;

use once_cell::sync::OnceCell;

use crate::error::{OthelloError, Result};
use crate::types::{CellState, Color, Move, Position, Score};

pub const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
/// Above this many empty cells, rays are seeded from the empties.
const SEED_FROM_EMPTIES_ABOVE: u8 = 50;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub type Grid = [[CellState; BOARD_SIZE]; BOARD_SIZE];

/// Where move generation starts its rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RaySeed {
    /// Every empty cell; the ray must end on the mover's stone.
    Empties,
    /// Every stone of the mover; the ray must end on an empty cell.
    Stones,
}

/// End of a run of opponent stones.
struct RayEnd {
    row: usize,
    col: usize,
    crossed: usize,
}

/// One Othello position: the grid plus the side to move.
///
/// Positions are values. [`Board::apply`] returns a fresh board and leaves
/// `self` untouched, so a board can be shared for reading across threads.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    next_to_move: Option<Color>,
    empty_count: u8,
    score: OnceCell<Score>,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white, black to move.
    pub fn new() -> Self {
        let mut board = Self {
            grid: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
            next_to_move: None,
            empty_count: NUM_SQUARES as u8,
            score: OnceCell::new(),
        };
        board.clear();
        board
    }

    /// Builds an arbitrary position. Hint markers are dropped, and the board
    /// is marked finished when neither side can move.
    pub fn from_grid(grid: Grid, to_move: Color) -> Self {
        let mut grid = grid;
        for cell in grid.iter_mut().flatten() {
            if *cell == CellState::Hint {
                *cell = CellState::Empty;
            }
        }
        let empty_count = grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == CellState::Empty)
            .count() as u8;

        let mut board = Self {
            grid,
            next_to_move: Some(to_move),
            empty_count,
            score: OnceCell::new(),
        };
        if board.valid_moves().is_empty() {
            board.next_to_move = None;
        }
        board
    }

    /// Resets to the four-stone opening with black to move.
    pub fn clear(&mut self) {
        self.grid = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.grid[3][3] = CellState::White;
        self.grid[4][4] = CellState::White;
        self.grid[3][4] = CellState::Black;
        self.grid[4][3] = CellState::Black;
        self.next_to_move = Some(Color::Black);
        self.empty_count = (NUM_SQUARES - 4) as u8;
        self.score = OnceCell::new();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell content, `None` when `pos` is off the board.
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        pos.in_bounds()
            .then(|| self.grid[pos.row as usize][pos.col as usize])
    }

    pub fn next_to_move(&self) -> Option<Color> {
        self.next_to_move
    }

    pub fn finished(&self) -> bool {
        self.next_to_move.is_none()
    }

    pub fn empty_count(&self) -> u8 {
        self.empty_count
    }

    /// Stone counts and side to move, computed once per position.
    pub fn score(&self) -> Score {
        *self.score.get_or_init(|| {
            let mut black = 0;
            let mut white = 0;
            for cell in self.grid.iter().flatten() {
                match cell {
                    CellState::Black => black += 1,
                    CellState::White => white += 1,
                    CellState::Empty | CellState::Hint => {}
                }
            }
            Score {
                black,
                white,
                next_to_move: self.next_to_move,
            }
        })
    }

    /// Legal moves for the side to move, in row-major order.
    ///
    /// Returns the single skip move when the mover is stuck but the opponent
    /// is not, and an empty list when neither side can play.
    pub fn valid_moves(&self) -> Vec<Move> {
        let Some(color) = self.next_to_move else {
            return Vec::new();
        };

        let moves = self.placements(color);
        if !moves.is_empty() {
            return moves;
        }
        if self.placements(color.other()).is_empty() {
            Vec::new()
        } else {
            vec![Move::skip(color)]
        }
    }

    /// Returns the position after `mv`, or an error when `mv` is not legal here.
    pub fn apply(&self, mv: Move) -> Result<Board> {
        let Some(to_move) = self.next_to_move else {
            return Err(OthelloError::GameOver);
        };
        if mv.color() != to_move {
            return Err(OthelloError::InvalidMove(mv));
        }

        match mv {
            Move::Place { pos, color } => {
                if !pos.in_bounds() {
                    return Err(OthelloError::OutOfRange {
                        row: pos.row,
                        col: pos.col,
                    });
                }
                if self.cell(pos) != Some(CellState::Empty) || self.flip_count(pos, color) == 0 {
                    return Err(OthelloError::InvalidMove(mv));
                }
            }
            Move::Skip { color } => {
                if !self.placements(color).is_empty() || self.placements(color.other()).is_empty() {
                    return Err(OthelloError::InvalidMove(mv));
                }
            }
        }

        Ok(self.apply_unchecked(mv))
    }

    /// Applies a move taken from [`Board::valid_moves`] without re-checking it.
    pub(crate) fn apply_unchecked(&self, mv: Move) -> Board {
        let color = mv.color();
        let mut next = Board {
            grid: self.grid,
            next_to_move: Some(color.other()),
            empty_count: self.empty_count,
            score: OnceCell::new(),
        };

        if let Move::Place { pos, .. } = mv {
            next.place_stone(pos, color);
        }
        if next.valid_moves().is_empty() {
            next.next_to_move = None;
        }
        next
    }

    /// Copy of the grid with every legal destination of the mover marked as a hint.
    pub fn hinted_grid(&self) -> Grid {
        let mut grid = self.grid;
        for pos in self.valid_moves().iter().filter_map(Move::position) {
            grid[pos.row as usize][pos.col as usize] = CellState::Hint;
        }
        grid
    }

    /// Cells holding a stone in both positions whose color differs in `next`.
    pub fn flipped_by(&self, next: &Board) -> Vec<Position> {
        let mut flipped = Vec::new();
        for (row, (before, after)) in self.grid.iter().zip(next.grid.iter()).enumerate() {
            for (col, (&a, &b)) in before.iter().zip(after.iter()).enumerate() {
                if a.color().is_some() && b.color().is_some() && a != b {
                    flipped.push(Position::new(row as u8, col as u8));
                }
            }
        }
        flipped
    }

    fn placements(&self, color: Color) -> Vec<Move> {
        let seed = if self.empty_count > SEED_FROM_EMPTIES_ABOVE {
            RaySeed::Empties
        } else {
            RaySeed::Stones
        };
        self.placements_seeded(color, seed)
    }

    fn placements_seeded(&self, color: Color, seed: RaySeed) -> Vec<Move> {
        self.destinations(color, seed)
            .iter()
            .enumerate()
            .filter(|&(_, &legal)| legal)
            .map(|(idx, _)| {
                Move::place(color, (idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8)
            })
            .collect()
    }

    /// Marks every legal destination for `color`. Both seeds mark the same cells.
    fn destinations(&self, color: Color, seed: RaySeed) -> [bool; NUM_SQUARES] {
        let me = CellState::for_color(color);
        let opp = me.other();
        let mut marks = [false; NUM_SQUARES];

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let origin = self.grid[row][col];
                match seed {
                    RaySeed::Empties if origin == CellState::Empty => {
                        let legal = DIRECTIONS.iter().any(|&dir| {
                            self.run_end(row, col, dir, opp)
                                .is_some_and(|end| self.grid[end.row][end.col] == me)
                        });
                        marks[row * BOARD_SIZE + col] = legal;
                    }
                    RaySeed::Stones if origin == me => {
                        for dir in DIRECTIONS {
                            if let Some(end) = self.run_end(row, col, dir, opp)
                                && self.grid[end.row][end.col] == CellState::Empty
                            {
                                marks[end.row * BOARD_SIZE + end.col] = true;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        marks
    }

    /// Walks from (row, col) over consecutive `opp` stones. Returns the first
    /// cell past the run when at least one stone was crossed and the walk
    /// stayed on the board.
    fn run_end(&self, row: usize, col: usize, (dr, dc): (i32, i32), opp: CellState) -> Option<RayEnd> {
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut crossed = 0;

        while in_bounds(r, c) && self.grid[r as usize][c as usize] == opp {
            crossed += 1;
            r += dr;
            c += dc;
        }

        if crossed == 0 || !in_bounds(r, c) {
            return None;
        }
        Some(RayEnd {
            row: r as usize,
            col: c as usize,
            crossed,
        })
    }

    fn flip_count(&self, pos: Position, color: Color) -> usize {
        let me = CellState::for_color(color);
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.run_end(pos.row as usize, pos.col as usize, dir, me.other()))
            .filter(|end| self.grid[end.row][end.col] == me)
            .map(|end| end.crossed)
            .sum()
    }

    /// Places one stone and flips every bracketed run.
    fn place_stone(&mut self, pos: Position, color: Color) {
        let me = CellState::for_color(color);
        let (row, col) = (pos.row as usize, pos.col as usize);
        self.grid[row][col] = me;
        self.empty_count -= 1;

        for (dr, dc) in DIRECTIONS {
            let Some(end) = self.run_end(row, col, (dr, dc), me.other()) else {
                continue;
            };
            if self.grid[end.row][end.col] != me {
                continue;
            }
            for step in 1..=end.crossed as i32 {
                let r = (row as i32 + dr * step) as usize;
                let c = (col as i32 + dc * step) as usize;
                self.grid[r][c] = me;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.next_to_move == other.next_to_move
    }
}

impl Eq for Board {}

impl Index<usize> for Board {
    type Output = [CellState; BOARD_SIZE];

    fn index(&self, row: usize) -> &Self::Output {
        &self.grid[row]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: String = row.iter().map(|cell| cell.ascii()).collect();
            writeln!(f, "{line}")?;
        }
        write!(f, "{}", self.score())
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
