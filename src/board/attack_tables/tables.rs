//! Builders for the precomputed tables. Everything here is a pure function of
//! board geometry.

use crate::board::{Bitboard, Direction, Square};

pub(super) fn knight_attacks(sq: Square) -> Bitboard {
    let bb = sq.bit().0;
    let not_a = !Bitboard::FILE_A.0;
    let not_ab = !(Bitboard::FILE_A.0 | Bitboard::FILE_B.0);
    let not_h = !Bitboard::FILE_H.0;
    let not_gh = !(Bitboard::FILE_G.0 | Bitboard::FILE_H.0);
    Bitboard(
        ((bb & not_h) << 17)
            | ((bb & not_gh) << 10)
            | ((bb & not_gh) >> 6)
            | ((bb & not_h) >> 15)
            | ((bb & not_a) << 15)
            | ((bb & not_ab) << 6)
            | ((bb & not_ab) >> 10)
            | ((bb & not_a) >> 17),
    )
}

pub(super) fn king_attacks(sq: Square) -> Bitboard {
    let bb = sq.bit();
    Direction::ALL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | bb.shift(dir))
}

/// Squares a pawn of the given side on `sq` attacks; index 0 is White
pub(super) fn pawn_attacks(sq: Square) -> [Bitboard; 2] {
    let bb = sq.bit();
    [
        bb.shift_north_east() | bb.shift_north_west(),
        bb.shift_south_east() | bb.shift_south_west(),
    ]
}

/// Everything visible from `sq` in `dir` on an empty board
pub(super) fn ray(sq: Square, dir: Direction) -> Bitboard {
    let mut ray = Bitboard::EMPTY;
    let mut cursor = sq.bit().shift(dir);
    while cursor.is_nonempty() {
        ray |= cursor;
        cursor = cursor.shift(dir);
    }
    ray
}

/// Squares strictly between `a` and `b` when they share a rank, file or diagonal
pub(super) fn between(a: Square, b: Square) -> Bitboard {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    let rank_diff = high.rank() as isize - low.rank() as isize;
    let file_diff = high.file() as isize - low.file() as isize;

    let dir = if low == high {
        return Bitboard::EMPTY;
    } else if file_diff == 0 {
        Direction::North
    } else if rank_diff == 0 {
        Direction::East
    } else if rank_diff == file_diff {
        Direction::NorthEast
    } else if rank_diff == -file_diff {
        Direction::NorthWest
    } else {
        return Bitboard::EMPTY;
    };

    let target = high.bit();
    let mut result = Bitboard::EMPTY;
    let mut cursor = low.bit().shift(dir);
    while cursor != target && cursor.is_nonempty() {
        result |= cursor;
        cursor = cursor.shift(dir);
    }
    result
}
