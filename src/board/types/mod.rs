//! Core chess types.
//!
//! This module contains the fundamental value types used throughout the kernel:
//! - `Piece` and `Color` - piece types and sides
//! - `Square` - board square index (u8)
//! - `Bitboard` and `Direction` - 64-bit square sets and the compass shifts over them
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod direction;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use direction::Direction;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
