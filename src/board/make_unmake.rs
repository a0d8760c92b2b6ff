use super::{Color, Move, MoveState, Piece, Position, Square, UndoStack};

/// Rook start and destination squares for a castling king move landing on `king_to`
#[inline]
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let rank_base = king_to.rank() * 8;
    if king_to.file() == 6 {
        (Square::from_index(rank_base + 7), Square::from_index(rank_base + 5))
    } else {
        (Square::from_index(rank_base), Square::from_index(rank_base + 3))
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`
#[inline]
fn en_passant_victim(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => Square::from_index(to.index() - 8),
        Color::Black => Square::from_index(to.index() + 8),
    }
}

/// Castling side whose rook starts on `sq`, if `sq` is one of `color`'s corners
#[inline]
fn rook_home_side(color: Color, sq: Square) -> Option<bool> {
    if sq.rank() != color.back_rank() {
        return None;
    }
    match sq.file() {
        7 => Some(true),
        0 => Some(false),
        _ => None,
    }
}

impl Position {
    /// Apply `mv`, pushing the state needed to reverse it onto `stack`.
    ///
    /// # Panics
    /// Panics if `mv.from` is empty.
    pub fn make_move(&mut self, mv: Move, stack: &mut UndoStack) {
        let state = self.do_move(mv);
        stack.push(state);
    }

    /// Reverse the most recent `make_move`, which must have been `mv`.
    ///
    /// # Panics
    /// Panics if `stack` is empty.
    pub fn unmake_move(&mut self, mv: Move, stack: &mut UndoStack) {
        let state = stack.pop();
        self.undo_move(mv, state);
    }

    pub(crate) fn do_move(&mut self, mv: Move) -> MoveState {
        let color = self.side_to_move;
        let (mover_color, moving_piece) = self
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("make_move {mv}: no piece on {}", mv.from));
        debug_assert_eq!(mover_color, color, "make_move {mv}: piece belongs to the side not on move");

        let captured = if mv.is_en_passant {
            self.take_piece(en_passant_victim(mv.to, color))
        } else {
            self.take_piece(mv.to)
        };
        let state = MoveState {
            halfmove_clock: self.halfmove_clock,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            captured,
        };

        match moving_piece {
            Piece::King => self.castling_rights.clear(color),
            Piece::Rook => {
                if let Some(kingside) = rook_home_side(color, mv.from) {
                    self.castling_rights.remove(color, kingside);
                }
            }
            _ => {}
        }
        if let Some((victim_color, Piece::Rook)) = captured {
            if let Some(kingside) = rook_home_side(victim_color, mv.to) {
                self.castling_rights.remove(victim_color, kingside);
            }
        }

        if moving_piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.move_piece(mv.from, mv.to);

        if mv.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            self.move_piece(rook_from, rook_to);
            self.castling_rights.clear(color);
        } else if let Some(promo) = mv.promotion {
            self.take_piece(mv.to);
            self.put_piece(mv.to, color, promo);
        }

        self.en_passant = if moving_piece == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            Some(Square::from_index((mv.from.index() + mv.to.index()) / 2))
        } else {
            None
        };

        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = color.opponent();
        state
    }

    pub(crate) fn undo_move(&mut self, mv: Move, state: MoveState) {
        let color = self.side_to_move.opponent();
        self.side_to_move = color;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.halfmove_clock = state.halfmove_clock;
        self.castling_rights = state.castling_rights;
        self.en_passant = state.en_passant;

        if mv.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            self.move_piece(rook_to, rook_from);
        }

        if mv.promotion.is_some() {
            self.take_piece(mv.to);
            self.put_piece(mv.from, color, Piece::Pawn);
        } else {
            self.move_piece(mv.to, mv.from);
        }

        if let Some((victim_color, victim)) = state.captured {
            let sq = if mv.is_en_passant {
                en_passant_victim(mv.to, color)
            } else {
                mv.to
            };
            self.put_piece(sq, victim_color, victim);
        }
    }
}
