//! Attack tables for move generation.
//!
//! Leaper attacks (knight, king, pawn) are plain per-square lookups. Sliding
//! attacks use per-direction rays: the unobstructed ray is cut at the nearest
//! blocker by XOR-ing away that blocker's own ray in the same direction.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates

mod tables;

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Direction, Square};

/// Precomputed attack geometry. Built once, read-only afterwards.
#[derive(Clone)]
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    rays: [[Bitboard; 8]; 64],
    between: Box<[[Bitboard; 64]; 64]>,
}

static SHARED: Lazy<AttackTables> = Lazy::new(AttackTables::new);

/// Returns the process-wide tables, building them on first use.
///
/// Safe to call from any thread and any number of times; every call returns
/// the same instance.
pub fn initialize_tables() -> &'static AttackTables {
    &SHARED
}

impl AttackTables {
    /// Build a fresh, independently owned set of tables.
    #[must_use]
    pub fn new() -> Self {
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        let mut rays = [[Bitboard::EMPTY; 8]; 64];
        let mut between = Box::new([[Bitboard::EMPTY; 64]; 64]);

        for sq in Square::all() {
            let i = sq.index();
            knight[i] = tables::knight_attacks(sq);
            king[i] = tables::king_attacks(sq);
            let [white, black] = tables::pawn_attacks(sq);
            pawn[Color::White.index()][i] = white;
            pawn[Color::Black.index()][i] = black;
            for dir in Direction::ALL {
                rays[i][dir.index()] = tables::ray(sq, dir);
            }
        }

        for a in 0..64 {
            for b in (a + 1)..64 {
                let bb = tables::between(Square::from_index(a), Square::from_index(b));
                between[a][b] = bb;
                between[b][a] = bb;
            }
        }

        AttackTables {
            knight,
            king,
            pawn,
            rays,
            between,
        }
    }

    #[inline]
    #[must_use]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    /// Squares attacked by a pawn of `color` standing on `sq`
    #[inline]
    #[must_use]
    pub fn pawn(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index()]
    }

    /// Unobstructed ray from `sq` to the board edge
    #[inline]
    #[must_use]
    pub fn ray(&self, sq: Square, dir: Direction) -> Bitboard {
        self.rays[sq.index()][dir.index()]
    }

    /// Squares strictly between `a` and `b`; empty when unaligned or adjacent
    #[inline]
    #[must_use]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index()][b.index()]
    }

    /// Attacks along one direction, stopping at (and including) the first blocker.
    #[inline]
    #[must_use]
    pub fn sliding_attacks(&self, occupancy: Bitboard, dir: Direction, sq: Square) -> Bitboard {
        let ray = self.ray(sq, dir);
        let blockers = ray & occupancy;
        let nearest = if dir.is_positive() {
            blockers.lsb()
        } else {
            blockers.msb()
        };
        match nearest {
            Some(blocker) => ray ^ self.ray(blocker, dir),
            None => ray,
        }
    }

    #[inline]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        Direction::ORTHOGONAL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| {
                acc | self.sliding_attacks(occupancy, dir, sq)
            })
    }

    #[inline]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        Direction::DIAGONAL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| {
                acc | self.sliding_attacks(occupancy, dir, sq)
            })
    }

    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupancy) | self.bishop_attacks(sq, occupancy)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        AttackTables::new()
    }
}
