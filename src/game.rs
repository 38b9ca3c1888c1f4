use tracing::{info, trace, warn};

use crate::ai::{EngineConfig, NegamaxPlayer};
use crate::board::Board;
use crate::error::{OthelloError, Result};
use crate::types::{Color, GameResult, GameState, Hint, Move, Position, Score};

/// Anything that can pick a move for one color.
pub trait Player: Send {
    fn color(&self) -> Color;

    /// Returns a move from `board.valid_moves()`.
    fn next_move(&mut self, board: &Board) -> Result<Move>;
}

/// Plays the first legal move in generation order.
#[derive(Debug, Clone, Copy)]
pub struct FirstMovePlayer {
    color: Color,
}

impl FirstMovePlayer {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Player for FirstMovePlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn next_move(&mut self, board: &Board) -> Result<Move> {
        if board.finished() {
            return Err(OthelloError::GameOver);
        }
        board
            .valid_moves()
            .first()
            .copied()
            .ok_or(OthelloError::NoLegalMoves)
    }
}

impl Player for NegamaxPlayer {
    fn color(&self) -> Color {
        NegamaxPlayer::color(self)
    }

    fn next_move(&mut self, board: &Board) -> Result<Move> {
        NegamaxPlayer::next_move(self, board)
    }
}

/// Drives a game between two players until the board is finished.
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
    last_move: Option<Move>,
}

impl Game {
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>) -> Result<Self> {
        if first.color() == second.color() {
            return Err(OthelloError::DuplicateColor(first.color()));
        }
        let players = if first.color() == Color::Black {
            [first, second]
        } else {
            [second, first]
        };

        Ok(Self {
            board: Board::new(),
            players,
            last_move: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Plays one ply. Returns `false` once the game is over.
    pub fn step(&mut self) -> Result<bool> {
        let color = self.board.next_to_move().ok_or(OthelloError::GameOver)?;
        let mv = self.players[color.index()].next_move(&self.board)?;

        self.board = self.board.apply(mv)?;
        self.last_move = Some(mv);
        trace!(%mv, score = %self.board.score(), "move applied");

        if self.board.finished() {
            info!(score = %self.board.score(), "game over");
            return Ok(false);
        }
        Ok(true)
    }

    /// Plays until the end and returns the final score.
    pub fn run(&mut self) -> Result<Score> {
        while self.step()? {}
        Ok(self.board.score())
    }
}

/// Human against the negamax AI, driven one action at a time by a front end.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    human: Color,
    ai: NegamaxPlayer,
    hint_depth: u32,
    is_pass: bool,
    flipped: Vec<Position>,
    last_move: Option<Move>,
}

impl GameSession {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        if config.hint_depth == 0 {
            return Err(OthelloError::InvalidDepth);
        }
        let ai = NegamaxPlayer::from_config(config)?;

        Ok(Self {
            board: Board::new(),
            human: ai.color().other(),
            ai,
            hint_depth: config.hint_depth,
            is_pass: false,
            flipped: Vec::new(),
            last_move: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn is_game_over(&self) -> bool {
        self.board.finished()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.board.next_to_move() == Some(self.ai.color())
    }

    /// True when the side to move can only pass.
    pub fn must_pass(&self) -> bool {
        matches!(self.board.valid_moves().as_slice(), [mv] if mv.is_skip())
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.board
            .valid_moves()
            .iter()
            .filter_map(Move::position)
            .collect()
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<()> {
        self.ensure_turn(self.human)?;
        if !Position::new(row, col).in_bounds() {
            return Err(OthelloError::OutOfRange { row, col });
        }
        self.play(Move::place(self.human, row, col))
    }

    pub fn pass(&mut self) -> Result<()> {
        self.ensure_turn(self.human)?;
        self.play(Move::skip(self.human))
    }

    pub fn ai_move(&mut self) -> Result<Move> {
        self.ensure_turn(self.ai.color())?;
        let mv = self.ai.next_move(&self.board)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Scores every legal placement for the side to move.
    pub fn hints(&self) -> Result<Vec<Hint>> {
        let Some(color) = self.board.next_to_move() else {
            return Ok(Vec::new());
        };
        let advisor = NegamaxPlayer::with_weights(color, self.hint_depth, self.ai.weights().clone())?;

        Ok(advisor
            .score_moves(&self.board)
            .into_iter()
            .filter_map(|result| {
                let pos = result.mv.and_then(|mv| mv.position())?;
                Some(Hint {
                    pos,
                    score: result.score,
                })
            })
            .collect())
    }

    pub fn state(&self) -> GameState {
        let score = self.board.score();
        GameState {
            board: self.board.grid().iter().flatten().copied().collect(),
            next_to_move: score.next_to_move,
            human: self.human,
            black_count: score.black,
            white_count: score.white,
            is_game_over: score.finished(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.last_move,
            ai_score: self.ai.last_score(),
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        let score = self.board.score();
        score.finished().then(|| score.into())
    }

    /// Starts over with the same engine; the human keeps their color.
    pub fn restart(&mut self) {
        self.board.clear();
        self.ai.reset_last_score();
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = None;
    }

    fn ensure_turn(&self, color: Color) -> Result<()> {
        match self.board.next_to_move() {
            None => Err(OthelloError::GameOver),
            Some(to_move) if to_move != color => Err(OthelloError::NotYourTurn(color)),
            Some(_) => Ok(()),
        }
    }

    fn play(&mut self, mv: Move) -> Result<()> {
        let next = self
            .board
            .apply(mv)
            .inspect_err(|err| warn!(%mv, %err, "move rejected"))?;

        self.flipped = self.board.flipped_by(&next);
        self.is_pass = mv.is_skip();
        self.last_move = Some(mv);
        self.board = next;
        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, Grid};
    use crate::types::CellState;

    fn session() -> GameSession {
        GameSession::new(&EngineConfig::default()).unwrap()
    }

    /// Black at (0,1), (0,0) empty, white everywhere else.
    fn black_stuck() -> Board {
        let mut grid: Grid = [[CellState::White; BOARD_SIZE]; BOARD_SIZE];
        grid[0][0] = CellState::Empty;
        grid[0][1] = CellState::Black;
        Board::from_grid(grid, Color::Black)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = session();
        let state = game.state();

        assert_eq!(state.next_to_move, Some(Color::Black));
        assert_eq!(state.human, Color::Black);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.board.len(), 64);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(state.ai_score, None);
        assert_eq!(game.legal_moves().len(), 4);
        assert_eq!(game.result(), None);
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = session();

        assert_eq!(
            game.place(0, 0),
            Err(OthelloError::InvalidMove(Move::place(Color::Black, 0, 0)))
        );
        assert_eq!(game.place(9, 0), Err(OthelloError::OutOfRange { row: 9, col: 0 }));
        assert_eq!(game.state().black_count, 2);
    }

    #[test]
    fn turns_alternate_between_human_and_ai() {
        let mut game = session();

        assert_eq!(game.ai_move(), Err(OthelloError::NotYourTurn(Color::White)));
        game.place(2, 3).unwrap();
        assert_eq!(game.state().flipped, vec![Position::new(3, 3)]);
        assert_eq!(game.place(2, 2), Err(OthelloError::NotYourTurn(Color::Black)));
        assert!(game.is_ai_turn());

        let mv = game.ai_move().unwrap();
        let state = game.state();
        assert_eq!(mv.color(), Color::White);
        assert_eq!(state.last_move, Some(mv));
        assert!(!state.flipped.is_empty());
        assert!(state.ai_score.is_some());
        assert_eq!(state.next_to_move, Some(Color::Black));
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let mut game = session();
        game.set_board_for_test(black_stuck());

        assert!(game.must_pass());
        assert!(game.legal_moves().is_empty());
        game.pass().unwrap();

        let state = game.state();
        assert_eq!(state.next_to_move, Some(Color::White));
        assert!(state.is_pass);
        assert!(state.flipped.is_empty());
        assert!(!state.is_game_over);
    }

    #[test]
    fn t05_ai_filling_the_board_ends_the_game() {
        let mut game = session();
        game.set_board_for_test(black_stuck());
        game.pass().unwrap();

        assert_eq!(game.ai_move().unwrap(), Move::place(Color::White, 0, 0));
        let state = game.state();
        assert!(state.is_game_over);
        assert_eq!(state.next_to_move, None);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![Position::new(0, 1)]);
        assert_eq!(
            game.result(),
            Some(GameResult {
                winner: Some(Color::White),
                black_count: 0,
                white_count: 64,
            })
        );
        assert_eq!(game.pass(), Err(OthelloError::GameOver));
    }

    #[test]
    fn pass_is_rejected_while_a_placement_exists() {
        let mut game = session();
        assert_eq!(
            game.pass(),
            Err(OthelloError::InvalidMove(Move::skip(Color::Black)))
        );
    }

    #[test]
    fn hints_cover_every_legal_placement() {
        let game = session();
        let hints = game.hints().unwrap();
        let positions: Vec<Position> = hints.iter().map(|hint| hint.pos).collect();

        assert_eq!(positions, game.legal_moves());
    }

    #[test]
    fn restart_returns_to_the_opening() {
        let mut game = session();
        game.place(2, 3).unwrap();
        game.ai_move().unwrap();

        game.restart();

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.state().last_move, None);
        assert_eq!(game.state().ai_score, None);
    }

    #[test]
    fn game_driver_plays_to_the_end() {
        let mut game = Game::new(
            Box::new(FirstMovePlayer::new(Color::White)),
            Box::new(FirstMovePlayer::new(Color::Black)),
        )
        .unwrap();

        let score = game.run().unwrap();

        assert!(score.finished());
        assert!(game.board().finished());
        assert!(game.last_move().is_some());
        assert_eq!(game.step(), Err(OthelloError::GameOver));
    }

    #[test]
    fn game_rejects_two_players_of_one_color() {
        let result = Game::new(
            Box::new(FirstMovePlayer::new(Color::Black)),
            Box::new(FirstMovePlayer::new(Color::Black)),
        );
        assert!(matches!(result, Err(OthelloError::DuplicateColor(Color::Black))));
    }
}
