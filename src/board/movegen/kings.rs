use super::super::{AttackTables, Move, MoveList, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, tables: &AttackTables, moves: &mut MoveList) {
        let us = self.side_to_move;
        let own_occ = self.occupied(us);
        let Some(from) = self.king_square(us) else {
            return;
        };

        for to in tables.king(from) & !own_occ {
            moves.push(Move::new(from, to));
        }

        let rank_base = us.back_rank() * 8;
        if from.index() != rank_base + 4 {
            return;
        }
        let occupancy = self.occupancy();
        for (kingside, rook_file, king_to_file) in [(true, 7, 6), (false, 0, 2)] {
            let rook_sq = Square::from_index(rank_base + rook_file);
            if self.castling_rights.has(us, kingside)
                && self.piece_at(rook_sq) == Some((us, Piece::Rook))
                && (tables.between(from, rook_sq) & occupancy).is_empty()
            {
                moves.push(Move::castle(from, Square::from_index(rank_base + king_to_file)));
            }
        }
    }
}
