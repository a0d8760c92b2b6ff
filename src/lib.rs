pub mod board;
pub mod uci;

pub use board::{initialize_tables, AttackTables, Color, Move, Piece, Position, Square};
