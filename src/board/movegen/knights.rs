use super::super::{AttackTables, Move, MoveList, Piece, Position};

impl Position {
    pub(crate) fn generate_knight_moves(&self, tables: &AttackTables, moves: &mut MoveList) {
        let us = self.side_to_move;
        let own_occ = self.occupied(us);
        for from in self.pieces(us, Piece::Knight) {
            for to in tables.knight(from) & !own_occ {
                moves.push(Move::new(from, to));
            }
        }
    }
}
