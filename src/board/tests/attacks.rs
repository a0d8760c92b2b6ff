//! Attack queries, pins and castling legality.

use super::sq;
use crate::board::{initialize_tables, Bitboard, Color, Move, Piece, Position};

fn bitboard_of(squares: &[&str]) -> Bitboard {
    squares
        .iter()
        .fold(Bitboard::EMPTY, |acc, s| acc | sq(s).bit())
}

#[test]
fn test_pinned_pawn_and_castling_legality() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("3kr3/8/8/q7/7B/6n1/3PR3/R3K2R w KQkq - 0 1");

    assert!(!pos.legal(tables, Move::new(sq("d2"), sq("d4"))), "d2 is pinned by a5");
    assert!(
        !pos.legal(tables, Move::castle(sq("e1"), sq("g1"))),
        "f1 is covered by the g3 knight"
    );
    assert!(pos.legal(tables, Move::castle(sq("e1"), sq("c1"))));

    let moves = pos.generate_moves(tables);
    assert!(!moves.iter().any(|m| m.from == sq("d2")));
    assert!(moves.contains(&Move::castle(sq("e1"), sq("c1"))));
    assert!(!moves.contains(&Move::castle(sq("e1"), sq("g1"))));
}

#[test]
fn test_legal_leaves_position_unchanged() {
    let tables = initialize_tables();
    let mut pos = Position::from_fen("3kr3/8/8/q7/7B/6n1/3PR3/R3K2R w KQkq - 0 1");
    let before = pos.clone();
    for mv in pos.generate_pseudo_moves(tables) {
        let _ = pos.legal(tables, mv);
        assert_eq!(pos, before, "legal({mv}) modified the position");
    }
}

#[test]
fn test_attackers_to_blocked_and_direct() {
    let tables = initialize_tables();
    let pos = Position::from_fen("4k1RQ/3PPP2/6B1/8/8/8/8/8 b - - 0 1");
    let attackers = pos.attackers_to(tables, sq("e8"), Color::White);
    assert_eq!(attackers, bitboard_of(&["d7", "f7", "g8"]));
    assert!(pos.is_in_check(tables, Color::Black));
    assert!(!pos.is_in_check(tables, Color::White), "no white king means no check");
}

#[test]
fn test_pawn_attacks_from_empty_square_use_side_to_move() {
    let tables = initialize_tables();
    let white = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let black = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    assert_eq!(
        white.attacks_from(tables, Piece::Pawn, sq("e4")),
        bitboard_of(&["d5", "f5"])
    );
    assert_eq!(
        black.attacks_from(tables, Piece::Pawn, sq("e4")),
        bitboard_of(&["d3", "f3"])
    );
    assert_eq!(
        white.attacks_from(tables, Piece::Pawn, sq("a2")),
        bitboard_of(&["b3"])
    );
}

#[test]
fn test_slider_attacks_stop_at_blockers() {
    let tables = initialize_tables();
    let pos = Position::from_fen("4k3/8/8/1p6/8/3R4/8/4K3 w - - 0 1");
    let rook = pos.attacks_from(tables, Piece::Rook, sq("d3"));
    assert!(rook.contains(sq("d8")));
    assert!(rook.contains(sq("a3")));
    assert!(rook.contains(sq("d1")));
    assert_eq!(rook.popcount(), 14);

    let bishop = pos.attacks_from(tables, Piece::Bishop, sq("d3"));
    assert!(bishop.contains(sq("c4")));
    assert!(bishop.contains(sq("b5")), "the blocker itself is attacked");
    assert!(!bishop.contains(sq("a6")));
    assert!(bishop.contains(sq("e2")));
    assert!(bishop.contains(sq("f1")));
}

#[test]
fn test_is_square_attacked_by_each_piece() {
    let tables = initialize_tables();
    let pos = Position::from_fen("4k3/8/8/3n4/8/8/8/4K3 w - - 0 1");
    assert!(pos.is_square_attacked(tables, sq("e3"), Color::Black));
    assert!(pos.is_square_attacked(tables, sq("f7"), Color::Black), "king covers f7");
    assert!(!pos.is_square_attacked(tables, sq("d4"), Color::Black));
    assert!(pos.is_square_attacked(tables, sq("d2"), Color::White));
}

#[test]
fn test_check_detection() {
    let tables = initialize_tables();
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert!(pos.is_in_check(tables, Color::White));
    assert!(!pos.is_in_check(tables, Color::Black));

    let pos = Position::new();
    assert!(!pos.is_in_check(tables, Color::White));
    assert!(!pos.is_in_check(tables, Color::Black));
}
