#![cfg(feature = "serde")]

use chess_kernel::board::{CastlingRights, Color, Move, Piece, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn moves_survive_json() {
    let moves = vec![
        Move::new(sq("e2"), sq("e4")),
        Move::new_promotion(sq("a7"), sq("b8"), Piece::Knight),
        Move::en_passant(sq("e5"), sq("d6")),
        Move::castle(sq("e8"), sq("c8")),
    ];
    let json = serde_json::to_string(&moves).unwrap();
    let decoded: Vec<Move> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, moves);
}

#[test]
fn castling_rights_and_colors_survive_json() {
    let mut rights = CastlingRights::none();
    rights.set(Color::White, true);
    rights.set(Color::Black, false);

    let json = serde_json::to_string(&(rights, Color::Black, Piece::Queen)).unwrap();
    let decoded: (CastlingRights, Color, Piece) = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, (rights, Color::Black, Piece::Queen));
}
