use std::fmt;

use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// Irreversible state destroyed by a move, saved so the move can be unmade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveState {
    pub(crate) halfmove_clock: u32,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) captured: Option<(Color, Piece)>,
}

impl MoveState {
    /// The piece removed by the move this record belongs to, if any
    #[must_use]
    pub fn captured(&self) -> Option<(Color, Piece)> {
        self.captured
    }
}

/// Caller-owned LIFO of [`MoveState`] records.
///
/// Its depth always equals the number of moves made and not yet unmade on
/// the position it is paired with.
#[derive(Clone, Debug, Default)]
pub struct UndoStack {
    states: Vec<MoveState>,
}

impl UndoStack {
    #[must_use]
    pub fn new() -> Self {
        UndoStack { states: Vec::new() }
    }

    /// Pre-size for a search of the given depth
    #[must_use]
    pub fn with_capacity(depth: usize) -> Self {
        UndoStack {
            states: Vec::with_capacity(depth),
        }
    }

    pub(crate) fn push(&mut self, state: MoveState) {
        self.states.push(state);
    }

    /// # Panics
    /// Panics when empty: an unmake without a matching make is a caller bug.
    pub(crate) fn pop(&mut self) -> MoveState {
        self.states
            .pop()
            .expect("unmake_move called with an empty undo stack")
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

/// A chess position.
///
/// Pieces are stored three ways: one bitboard per (color, piece), a dense
/// square-to-piece array, and per-side occupancy. All mutation goes through
/// the placement helpers below so the three never disagree.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) piece_list: [Option<(Color, Piece)>; 64],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            pos.put_piece(Square::from_index(file), Color::White, *piece);
            pos.put_piece(Square::from_index(56 + file), Color::Black, *piece);
            pos.put_piece(Square::from_index(8 + file), Color::White, Piece::Pawn);
            pos.put_piece(Square::from_index(48 + file), Color::Black, Piece::Pawn);
        }
        pos.castling_rights = CastlingRights::all();
        pos
    }

    /// A board with no pieces, White to move, no rights
    #[must_use]
    pub fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            piece_list: [None; 64],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.piece_list[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_list[sq.index()].is_none()
    }

    /// Bitboard of one side's pieces of one type
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All squares occupied by `color`
    #[inline]
    #[must_use]
    pub fn occupied(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// All occupied squares
    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The king's square, or `None` for a kingless side (test setups only)
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    pub(crate) fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.is_empty(sq), "put_piece on occupied square {sq}");
        let bit = sq.bit();
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.piece_list[sq.index()] = Some((color, piece));
    }

    /// Clear `sq` in all three representations, returning what stood there.
    pub(crate) fn take_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let taken = self.piece_list[sq.index()].take();
        if let Some((color, piece)) = taken {
            let bit = !sq.bit();
            self.pieces[color.index()][piece.index()] &= bit;
            self.occupied[color.index()] &= bit;
        }
        taken
    }

    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let (color, piece) = self
            .take_piece(from)
            .unwrap_or_else(|| panic!("move_piece from empty square {from}"));
        self.put_piece(to, color, piece);
    }

    /// Check the internal consistency of the three piece representations.
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        for color in Color::BOTH {
            let union = Piece::ALL
                .iter()
                .fold(Bitboard::EMPTY, |acc, &p| acc | self.pieces(color, p));
            if union != self.occupied(color) {
                return Err(format!("{color} occupancy does not match its piece bitboards"));
            }
        }
        if (self.occupied[0] & self.occupied[1]).is_nonempty() {
            return Err("White and Black occupancy overlap".to_string());
        }
        for sq in Square::all() {
            let mut owners = Vec::new();
            for color in Color::BOTH {
                for piece in Piece::ALL {
                    if self.pieces(color, piece).contains(sq) {
                        owners.push((color, piece));
                    }
                }
            }
            match (owners.as_slice(), self.piece_at(sq)) {
                ([], None) => {}
                ([owner], Some(listed)) if *owner == listed => {}
                _ => {
                    return Err(format!(
                        "square {sq}: piece list {:?} disagrees with bitboards {:?}",
                        self.piece_at(sq),
                        owners
                    ))
                }
            }
        }
        for color in Color::BOTH {
            if self.pieces(color, Piece::King).popcount() > 1 {
                return Err(format!("{color} has more than one king"));
            }
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self.to_fen())
    }
}

/// ASCII diagram, rank 8 first, followed by the board description
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                let c = match self.piece_at(sq) {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "Fen: {}", self.to_fen())
    }
}
