use super::super::{AttackTables, Move, MoveList, Piece, Position};

impl Position {
    /// Bishop, rook and queen moves
    pub(crate) fn generate_slider_moves(&self, tables: &AttackTables, moves: &mut MoveList) {
        let us = self.side_to_move;
        let own_occ = self.occupied(us);
        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in self.pieces(us, piece) {
                for to in self.attacks_from(tables, piece, from) & !own_occ {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }
}
