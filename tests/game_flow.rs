use std::time::{Duration, Instant};

use rbmc::{
    play_local_game, Color, GameConfig, GameError, GameStatus, LocalGame, Move, RandomBot, Square, WinReason,
};

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn assert_out_of_turn<T: std::fmt::Debug>(result: rbmc::Result<T>) {
    match result {
        Err(GameError::OutOfTurn { .. }) => {}
        other => panic!("expected OutOfTurn, got {:?}", other),
    }
}

fn new_game() -> LocalGame {
    LocalGame::new(GameConfig::default()).unwrap()
}

#[test]
fn nothing_happens_before_start() {
    let mut game = new_game();
    assert_eq!(game.status(), GameStatus::NotStarted);
    assert_out_of_turn(game.sense(Color::White, Square::E4));
    assert_out_of_turn(game.make_move(Color::White, mv("e2e4")));
    assert_out_of_turn(game.end_turn());
    assert_out_of_turn(game.resign(Color::White));

    game.start().unwrap();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_out_of_turn(game.start());
}

#[test]
fn wrong_side_cannot_act() {
    let mut game = new_game();
    game.start().unwrap();
    let fen = game.fen();

    assert_out_of_turn(game.sense(Color::Black, Square::E4));
    assert_out_of_turn(game.make_move(Color::Black, mv("e7e5")));
    assert_out_of_turn(game.attempt_move(Color::Black, Move::null()));
    assert_eq!(game.fen(), fen);
    assert_eq!(game.turn(), Color::White);

    game.make_move(Color::White, mv("e2e4")).unwrap();
    game.end_turn().unwrap();
    let fen = game.fen();
    assert_out_of_turn(game.sense(Color::White, Square::E4));
    assert_out_of_turn(game.make_move(Color::White, mv("d2d4")));
    assert_eq!(game.fen(), fen);
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn one_sense_then_one_move_per_turn() {
    let mut game = new_game();
    game.start().unwrap();

    assert_out_of_turn(game.end_turn());
    let result = game.sense(Color::White, Square::E7).unwrap();
    assert_eq!(result.len(), 9);
    assert_out_of_turn(game.sense(Color::White, Square::D7));

    game.make_move(Color::White, mv("e2e4")).unwrap();
    assert_out_of_turn(game.make_move(Color::White, mv("d2d4")));
    assert_out_of_turn(game.sense(Color::White, Square::D7));
    game.end_turn().unwrap();

    // Sensing is optional.
    game.make_move(Color::Black, mv("e7e5")).unwrap();
    game.end_turn().unwrap();
    assert_eq!(game.board_fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR");
}

#[test]
fn rejected_sense_and_move_change_nothing() {
    let mut game = new_game();
    game.start().unwrap();
    let fen = game.fen();

    match game.sense(Color::White, Square::A1) {
        Err(GameError::InvalidSense { square }) => assert_eq!(square, Square::A1),
        other => panic!("expected InvalidSense, got {:?}", other),
    }
    // A rejected sense does not use up the turn's sense.
    game.sense(Color::White, Square::B2).unwrap();

    assert!(matches!(game.make_move(Color::White, mv("e2e5")), Err(GameError::InvalidMove { .. })));
    assert_eq!(game.fen(), fen);
    // Nor does a rejected move use up the turn's move.
    game.make_move(Color::White, mv("e2e4")).unwrap();
}

#[test]
fn attempt_move_rejects_moves_never_offered() {
    let mut game = new_game();
    game.start().unwrap();
    assert!(matches!(game.attempt_move(Color::White, mv("e2e5")), Err(GameError::InvalidMove { .. })));

    let outcome = game.attempt_move(Color::White, mv("e2d3")).unwrap();
    assert_eq!(outcome.taken, Move::null());
}

#[test]
fn king_capture_ends_the_game() {
    let mut game = LocalGame::from_fen(GameConfig::default(), "4k3/8/8/8/8/8/8/4R2K w - - 0 1").unwrap();
    game.start().unwrap();

    let outcome = game.make_move(Color::White, mv("e1e8")).unwrap();
    assert_eq!(outcome.capture_square, Some(Square::E8));
    assert_eq!(game.last_capture_square(), Some(Square::E8));
    assert!(!game.is_over());

    game.end_turn().unwrap();
    assert_eq!(game.status(), GameStatus::GameOver { winner: Some(Color::White), reason: WinReason::KingCapture });
    assert_eq!(game.winner(), Some(Color::White));
    assert_out_of_turn(game.sense(Color::Black, Square::E4));
    assert_out_of_turn(game.make_move(Color::Black, Move::null()));
}

#[test]
fn check_time_ends_the_game_on_expiry() {
    let t0 = Instant::now();
    let mut game = LocalGame::new(GameConfig::default().with_seconds_per_player(10.0)).unwrap();
    game.start_at(t0).unwrap();

    assert_eq!(game.check_time_at(t0 + Duration::from_secs(4)).unwrap(), 6.0);
    assert!(!game.is_over());

    match game.check_time_at(t0 + Duration::from_secs(11)) {
        Err(GameError::TimeExpired { color }) => assert_eq!(color, Color::White),
        other => panic!("expected TimeExpired, got {:?}", other),
    }
    assert_eq!(game.winner(), Some(Color::Black));
    assert_eq!(game.win_reason(), Some(WinReason::Timeout));
}

#[test]
fn overrun_turn_loses_at_end_turn() {
    let t0 = Instant::now();
    let mut game = LocalGame::new(GameConfig::default().with_seconds_per_player(10.0)).unwrap();
    game.start_at(t0).unwrap();

    game.make_move(Color::White, mv("e2e4")).unwrap();
    game.end_turn_at(t0 + Duration::from_secs(3)).unwrap();
    game.make_move(Color::Black, mv("e7e5")).unwrap();

    match game.end_turn_at(t0 + Duration::from_secs(20)) {
        Err(GameError::TimeExpired { color }) => assert_eq!(color, Color::Black),
        other => panic!("expected TimeExpired, got {:?}", other),
    }
    assert_eq!(game.status(), GameStatus::GameOver { winner: Some(Color::White), reason: WinReason::Timeout });
}

#[test]
fn resignation_hands_the_win_to_the_opponent() {
    let mut game = new_game();
    game.start().unwrap();
    game.resign(Color::Black).unwrap();
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(game.win_reason(), Some(WinReason::Resignation));
    assert_out_of_turn(game.resign(Color::White));
}

#[test]
fn history_records_each_turn() {
    let mut game = new_game();
    game.start().unwrap();

    game.sense(Color::White, Square::E7).unwrap();
    game.make_move(Color::White, mv("e2e4")).unwrap();
    game.end_turn().unwrap();
    game.attempt_move(Color::Black, mv("d7e6")).unwrap();
    game.end_turn().unwrap();

    let history = game.history();
    assert_eq!(history.senses(Color::White), &[Some(Square::E7)]);
    assert_eq!(history.senses(Color::Black), &[None]);
    assert_eq!(history.moves(Color::White)[0].taken, mv("e2e4"));
    assert_eq!(history.moves(Color::Black)[0].requested, mv("d7e6"));
    assert_eq!(history.moves(Color::Black)[0].taken, Move::null());
    assert_eq!(history.turns(Color::White), 1);

    let json = history.to_json().unwrap();
    assert!(json.contains("senses"));
    assert!(json.contains("capture_square"));
}

#[test]
fn random_bots_play_to_a_result_or_the_turn_limit() {
    for seed in 0..4u64 {
        let mut game = new_game();
        let mut white = RandomBot::new(seed);
        let mut black = RandomBot::new(seed + 100);
        let result = play_local_game(&mut white, &mut black, &mut game, Some(300)).unwrap();

        assert_eq!(white.color(), Some(Color::White));
        assert_eq!(black.color(), Some(Color::Black));
        assert!(result.turns <= 300);
        if game.is_over() {
            assert!(result.winner.is_some());
            assert_eq!(result.reason, game.win_reason());
        } else {
            assert_eq!(result.turns, 300);
        }
        let played = game.history().turns(Color::White) + game.history().turns(Color::Black);
        assert_eq!(played, result.turns);
    }
}
