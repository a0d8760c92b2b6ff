//! Static evaluation.

use super::{Color, Piece, Position};

/// Material values in centipawns, indexed by [`Piece::index`]
pub const PIECE_VALUES: [i32; 6] = [100, 300, 300, 500, 900, 100_000];

/// Scores a position from the point of view of the side to move.
pub trait Evaluator {
    fn evaluate(&self, pos: &Position) -> i32;
}

/// Plain material count.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// White material minus Black material
    #[must_use]
    pub fn material_balance(pos: &Position) -> i32 {
        Piece::ALL
            .iter()
            .map(|&piece| {
                let white = pos.pieces(Color::White, piece).popcount() as i32;
                let black = pos.pieces(Color::Black, piece).popcount() as i32;
                (white - black) * PIECE_VALUES[piece.index()]
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        Self::material_balance(pos) * pos.side_to_move().sign()
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, pos: &Position) -> i32 {
        (**self).evaluate(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(MaterialEvaluator.evaluate(&Position::new()), 0);
    }

    #[test]
    fn test_side_to_move_flips_sign() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let black = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert_eq!(MaterialEvaluator.evaluate(&white), 500);
        assert_eq!(MaterialEvaluator.evaluate(&black), -500);
    }

    #[test]
    fn test_mirrored_position_negates_balance() {
        let pos = Position::from_fen("r3k3/pp6/8/8/8/8/PPP5/RN2K3 w - - 0 1");
        let mirrored = Position::from_fen("rn2k3/ppp5/8/8/8/8/PP6/R3K3 b - - 0 1");
        assert_eq!(MaterialEvaluator::material_balance(&pos), 400);
        assert_eq!(
            MaterialEvaluator::material_balance(&mirrored),
            -MaterialEvaluator::material_balance(&pos)
        );
        assert_eq!(
            MaterialEvaluator.evaluate(&pos),
            MaterialEvaluator.evaluate(&mirrored)
        );
    }
}
