//! Chess board representation, move generation and search.
//!
//! Attack geometry lives in an explicitly passed [`AttackTables`]; positions
//! are mutated only through paired `make_move`/`unmake_move` calls that share
//! a caller-owned [`UndoStack`].
//!
//! # Example
//! ```
//! use chess_kernel::board::{initialize_tables, Position};
//!
//! let tables = initialize_tables();
//! let mut pos = Position::new();
//! let moves = pos.generate_moves(tables);
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod attacks;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::{initialize_tables, AttackTables};
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{Evaluator, MaterialEvaluator, PIECE_VALUES};
pub use fen::START_FEN;
pub use search::{
    find_best_move, SearchConfig, SearchResult, Searcher, DEFAULT_DEPTH, INFINITY, MATE_SCORE,
    MAX_DEPTH,
};
pub use state::{MoveState, Position, UndoStack};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Direction, Move, MoveList, MoveListIntoIter,
    Piece, Square,
};

pub(crate) use types::PROMOTION_PIECES;
