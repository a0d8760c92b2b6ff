//! Legal move generation.
//!
//! Each piece family has its own pseudo-legal generator; `generate_moves`
//! collects them and keeps only the moves that pass [`Position::legal`].

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{AttackTables, Move, MoveList, Position, UndoStack};

impl Position {
    pub(crate) fn generate_pseudo_moves(&self, tables: &AttackTables) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(tables, &mut moves);
        self.generate_knight_moves(tables, &mut moves);
        self.generate_slider_moves(tables, &mut moves);
        self.generate_king_moves(tables, &mut moves);
        moves
    }

    /// All legal moves for the side to move.
    ///
    /// The four promotion variants of one pawn move are generated together and
    /// share a single legality check.
    pub fn generate_moves(&mut self, tables: &AttackTables) -> MoveList {
        let pseudo_moves = self.generate_pseudo_moves(tables);
        let mut legal_moves = MoveList::new();
        let mut last_promotion: Option<(Move, bool)> = None;

        for &mv in pseudo_moves.iter() {
            let is_legal = match last_promotion {
                Some((prev, ok)) if mv.is_promotion() && prev.from == mv.from && prev.to == mv.to => ok,
                _ => {
                    let ok = self.legal(tables, mv);
                    if mv.is_promotion() {
                        last_promotion = Some((mv, ok));
                    }
                    ok
                }
            };
            if is_legal {
                legal_moves.push(mv);
            }
        }
        legal_moves
    }

    /// Count leaf nodes of the legal move tree to `depth`
    pub fn perft(&mut self, tables: &AttackTables, depth: usize) -> u64 {
        let mut stack = UndoStack::with_capacity(depth);
        self.perft_with(tables, depth, &mut stack)
    }

    /// Per-root-move leaf counts, in generation order. Depth 0 counts as 1.
    pub fn perft_divide(&mut self, tables: &AttackTables, depth: usize) -> Vec<(Move, u64)> {
        let mut stack = UndoStack::with_capacity(depth);
        let moves = self.generate_moves(tables);
        let mut divide = Vec::with_capacity(moves.len());
        for &mv in moves.iter() {
            self.make_move(mv, &mut stack);
            let nodes = if depth <= 1 {
                1
            } else {
                self.perft_with(tables, depth - 1, &mut stack)
            };
            self.unmake_move(mv, &mut stack);
            divide.push((mv, nodes));
        }
        divide
    }

    fn perft_with(&mut self, tables: &AttackTables, depth: usize, stack: &mut UndoStack) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves(tables);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in moves.iter() {
            self.make_move(mv, stack);
            nodes += self.perft_with(tables, depth - 1, stack);
            self.unmake_move(mv, stack);
        }
        nodes
    }
}
