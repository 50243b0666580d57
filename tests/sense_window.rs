use rbmc::{sense, valid_senses, Board, GameError, Square};

fn interior(sq: Square) -> bool {
    (1..=6).contains(&sq.file()) && (1..=6).contains(&sq.rank())
}

#[test]
fn exactly_the_interior_squares_are_sensable() {
    let senses = valid_senses();
    assert_eq!(senses.len(), 36);
    assert!(senses.windows(2).all(|w| w[0] < w[1]));
    for sq in Square::all() {
        assert_eq!(senses.contains(&sq), interior(sq), "{}", sq);
    }
}

#[test]
fn edge_squares_are_rejected() {
    let board = Board::initial();
    for sq in Square::all().filter(|&sq| !interior(sq)) {
        match sense(&board, sq) {
            Err(GameError::InvalidSense { square }) => assert_eq!(square, sq),
            other => panic!("sensing {} gave {:?}", sq, other),
        }
    }
}

#[test]
fn window_is_rank_above_first_files_ascending() {
    let board = Board::initial();
    for centre in valid_senses() {
        let result = sense(&board, centre).unwrap();
        assert_eq!(result.len(), 9);
        let expected: Vec<Square> = [1i8, 0, -1]
            .iter()
            .flat_map(|&dr| [-1i8, 0, 1].map(move |df| centre.offset(df, dr).unwrap()))
            .collect();
        let squares: Vec<Square> = result.iter().map(|(sq, _)| *sq).collect();
        assert_eq!(squares, expected, "window around {}", centre);
    }
}

#[test]
fn window_reports_true_occupants() {
    let board = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2").unwrap();
    for centre in valid_senses() {
        for (sq, piece) in sense(&board, centre).unwrap() {
            assert_eq!(piece, board.piece_at(sq));
        }
    }

    let result = sense(&board, Square::B7).unwrap();
    assert_eq!(result[0].0, Square::A8);
    assert_eq!(result[0].1.map(|p| p.to_char()), Some('r'));
    assert_eq!(result[8].0, Square::C6);
    assert_eq!(result[8].1, None);
}

#[test]
fn sensing_does_not_touch_the_board() {
    let board = Board::initial();
    let before = board.clone();
    sense(&board, Square::E7).unwrap();
    assert_eq!(board, before);
}
