use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use rbmc::{valid_moves, Board, Color, Move, PieceType, Square};

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

#[test]
fn starting_position_offers_pawn_diagonals_and_pass() {
    let board = Board::initial();
    let moves = valid_moves(&board);

    // 20 ordinary moves, 14 speculative pawn captures, and the pass.
    assert_eq!(moves.len(), 35);
    assert!(moves.contains(&Move::null()));
    for m in ["e2e4", "g1f3", "a2b3", "b2a3", "b2c3", "h2g3"] {
        assert!(moves.contains(&mv(m)), "missing {}", m);
    }
    assert!(!moves.contains(&mv("b1d2")));
    assert!(!moves.contains(&mv("e1g1")));
}

#[test]
fn black_gets_the_same_offers_after_a_pass() {
    let mut board = Board::initial();
    board.push(&Move::null());
    assert_eq!(board.turn, Color::Black);

    let moves = valid_moves(&board);
    assert_eq!(moves.len(), 35);
    assert!(moves.contains(&Move::null()));
    for m in ["e7e5", "a7b6", "h7g6", "d7c6", "d7e6", "b8c6"] {
        assert!(moves.contains(&mv(m)), "missing {}", m);
    }
}

#[test]
fn sliders_aim_through_hidden_pieces() {
    let board = Board::from_fen("8/8/8/8/p7/8/8/R7 w - - 0 1").unwrap();
    let moves = valid_moves(&board);
    assert!(moves.contains(&mv("a1a8")));
    assert!(board.generate_pseudo_legal_moves().iter().all(|m| m.to.rank() <= 3));
}

#[test]
fn diagonal_pawn_moves_to_the_last_rank_carry_promotions() {
    let board = Board::from_fen("8/3P4/8/8/8/8/8/8 w - - 0 1").unwrap();
    let moves = valid_moves(&board);
    for to in [Square::C8, Square::D8, Square::E8] {
        for kind in [PieceType::Queen, PieceType::Knight, PieceType::Rook, PieceType::Bishop] {
            assert!(moves.contains(&Move::with_promotion(Square::D7, to, kind)));
        }
    }
}

#[test]
fn castling_is_offered_when_own_pieces_allow_it() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3Kn1R w KQkq - 0 1").unwrap();
    let moves = valid_moves(&board);
    // The knight on f1 is hidden from white.
    assert!(moves.contains(&mv("e1g1")));
    assert!(moves.contains(&mv("e1c1")));
}

#[test]
fn offers_are_sorted_and_unique() {
    let board = Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
    let moves = valid_moves(&board);
    assert!(moves.windows(2).all(|w| w[0] < w[1]));
    assert!(moves.contains(&mv("e5d6")));
}

#[test]
fn superset_of_pseudo_legal_moves_in_random_play() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::initial();
        for _ in 0..200 {
            let offered = valid_moves(&board);
            assert!(offered.contains(&Move::null()));
            let pseudo = board.generate_pseudo_legal_moves();
            for m in &pseudo {
                assert!(offered.contains(m), "seed {}: {} missing at {}", seed, m, board.fen());
            }

            let Some(next) = pseudo.choose(&mut rng).copied() else { break };
            board.push(&next);
            if board.king_square(Color::White).is_none() || board.king_square(Color::Black).is_none() {
                break;
            }
        }
    }
}
