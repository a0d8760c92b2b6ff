//! Attack queries and simulate-and-check legality.

use super::{AttackTables, Bitboard, Color, Move, Piece, Position, Square};

impl Position {
    /// Squares attacked by a `piece` standing on `sq` given the current occupancy.
    ///
    /// Pawn attacks take the color of the pawn on `sq`, or the side to move
    /// when the square is empty.
    #[must_use]
    pub fn attacks_from(&self, tables: &AttackTables, piece: Piece, sq: Square) -> Bitboard {
        let occupancy = self.occupancy();
        match piece {
            Piece::Pawn => {
                let color = self
                    .piece_at(sq)
                    .map_or(self.side_to_move, |(color, _)| color);
                tables.pawn(color, sq)
            }
            Piece::Knight => tables.knight(sq),
            Piece::Bishop => tables.bishop_attacks(sq, occupancy),
            Piece::Rook => tables.rook_attacks(sq, occupancy),
            Piece::Queen => tables.queen_attacks(sq, occupancy),
            Piece::King => tables.king(sq),
        }
    }

    /// Every piece of side `by` that attacks `sq`
    #[must_use]
    pub fn attackers_to(&self, tables: &AttackTables, sq: Square, by: Color) -> Bitboard {
        let occupancy = self.occupancy();
        let queens = self.pieces(by, Piece::Queen);
        // A pawn of `by` attacks `sq` iff a pawn of the other side on `sq` would attack it
        (tables.pawn(by.opponent(), sq) & self.pieces(by, Piece::Pawn))
            | (tables.knight(sq) & self.pieces(by, Piece::Knight))
            | (tables.king(sq) & self.pieces(by, Piece::King))
            | (tables.bishop_attacks(sq, occupancy) & (self.pieces(by, Piece::Bishop) | queens))
            | (tables.rook_attacks(sq, occupancy) & (self.pieces(by, Piece::Rook) | queens))
    }

    #[inline]
    #[must_use]
    pub fn is_square_attacked(&self, tables: &AttackTables, sq: Square, by: Color) -> bool {
        self.attackers_to(tables, sq, by).is_nonempty()
    }

    /// False for a side without a king
    #[must_use]
    pub fn is_in_check(&self, tables: &AttackTables, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(tables, king, color.opponent()))
    }

    /// Whether a pseudo-legal move leaves the mover's king safe.
    ///
    /// The move is applied, the king probed, and the move undone; the position
    /// is unchanged on return.
    pub fn legal(&mut self, tables: &AttackTables, mv: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();

        if mv.is_castling {
            let passed = Square::from_index((mv.from.index() + mv.to.index()) / 2);
            if self.is_square_attacked(tables, mv.from, them)
                || self.is_square_attacked(tables, passed, them)
            {
                return false;
            }
        }

        let state = self.do_move(mv);
        let safe = !self.is_in_check(tables, us);
        self.undo_move(mv, state);
        safe
    }

    #[must_use]
    pub fn is_checkmate(&mut self, tables: &AttackTables) -> bool {
        self.is_in_check(tables, self.side_to_move) && self.generate_moves(tables).is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&mut self, tables: &AttackTables) -> bool {
        !self.is_in_check(tables, self.side_to_move) && self.generate_moves(tables).is_empty()
    }
}
