use super::super::{
    AttackTables, Bitboard, Color, Move, MoveList, Piece, Position, PROMOTION_PIECES,
};

impl Position {
    pub(crate) fn generate_pawn_moves(&self, tables: &AttackTables, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them = us.opponent();
        let empty = !self.occupancy();
        let enemies = self.occupied(them);
        let pawns = self.pieces(us, Piece::Pawn);

        let (promotion_rank, home_rank) = match us {
            Color::White => (Bitboard::RANK_7, Bitboard::RANK_2),
            Color::Black => (Bitboard::RANK_2, Bitboard::RANK_7),
        };
        let forward = |bb: Bitboard| match us {
            Color::White => bb.shift_north(),
            Color::Black => bb.shift_south(),
        };

        for from in pawns & !promotion_rank {
            let single = forward(from.bit()) & empty;
            let double = if home_rank.contains(from) {
                forward(single) & empty
            } else {
                Bitboard::EMPTY
            };
            let captures = tables.pawn(us, from) & enemies;
            for to in single | double | captures {
                moves.push(Move::new(from, to));
            }
        }

        for from in pawns & promotion_rank {
            let targets = (forward(from.bit()) & empty) | (tables.pawn(us, from) & enemies);
            for to in targets {
                for piece in PROMOTION_PIECES {
                    moves.push(Move::new_promotion(from, to, piece));
                }
            }
        }

        if let Some(ep) = self.en_passant {
            // Our pawns that could capture onto `ep` sit where an enemy pawn on `ep` would attack
            for from in tables.pawn(them, ep) & pawns {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}
