use othello::{Board, Color, FirstMovePlayer, Game, Move, NegamaxPlayer, Player};

fn negamax(color: Color, depth: u32) -> Box<dyn Player> {
    Box::new(NegamaxPlayer::new(color, depth).unwrap())
}

#[test]
fn negamax_beats_first_move_player() {
    let mut game = Game::new(negamax(Color::Black, 3), Box::new(FirstMovePlayer::new(Color::White))).unwrap();

    let score = game.run().unwrap();

    assert!(score.finished());
    assert_eq!(score.winning_color(), Some(Color::Black), "final score {score}");
}

#[test]
fn self_play_is_reproducible() {
    let play = || {
        let mut game = Game::new(negamax(Color::Black, 2), negamax(Color::White, 3)).unwrap();
        let mut moves = Vec::new();
        while game.step().unwrap() {
            moves.push(game.last_move().unwrap());
        }
        moves.push(game.last_move().unwrap());
        (moves, game.board().score())
    };

    let (first_moves, first_score) = play();
    let (second_moves, second_score) = play();

    assert_eq!(first_moves, second_moves);
    assert_eq!(first_score, second_score);
}

#[test]
fn every_position_in_a_game_keeps_the_board_invariants() {
    let mut board = Board::new();
    let mut black = NegamaxPlayer::new(Color::Black, 2).unwrap();
    let mut white = NegamaxPlayer::new(Color::White, 1).unwrap();
    let mut occupied = 4;

    while let Some(color) = board.next_to_move() {
        let moves = board.valid_moves();
        assert!(!moves.is_empty());
        if moves[0].is_skip() {
            assert_eq!(moves, vec![Move::skip(color)]);
        }

        let mv = match color {
            Color::Black => black.next_move(&board).unwrap(),
            Color::White => white.next_move(&board).unwrap(),
        };
        assert!(moves.contains(&mv));

        let next = board.apply(mv).unwrap();
        let score = next.score();
        let now_occupied = score.black + score.white;
        if mv.is_skip() {
            assert_eq!(next.grid(), board.grid());
        } else {
            assert_eq!(now_occupied, occupied + 1);
        }
        occupied = now_occupied;
        board = next;
    }

    assert!(board.valid_moves().is_empty());
}
