//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move counts against known node totals
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `attacks.rs` - Attack queries, pins and castling legality
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests

mod attacks;

use crate::board::{Move, Piece, Position, Square};

pub(super) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

pub(super) fn find_move(pos: &mut Position, text: &str) -> Move {
    let from = sq(&text[0..2]);
    let to = sq(&text[2..4]);
    let promotion = text[4..].chars().next().and_then(Piece::from_char);
    let tables = crate::board::initialize_tables();
    pos.generate_moves(tables)
        .iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promotion)
        .copied()
        .unwrap_or_else(|| panic!("Expected move {text} not found"))
}
