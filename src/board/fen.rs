use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{AttackTables, CastlingRights, Color, Move, Piece, Position, Square, UndoStack};

/// Board description of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Counters are capped at `u16::MAX` so make_move can always increment them
fn parse_counter(field: Option<&&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s
            .parse::<u16>()
            .map(u32::from)
            .map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            }),
    }
}

impl Position {
    /// Parse a board description (FEN).
    ///
    /// Placement, side to move, castling and en passant are required; the
    /// half-move clock and full-move number default to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut pos = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(rank, file).ok_or(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file + 1,
                })?;
                if piece == Piece::King && pos.pieces(color, Piece::King).is_nonempty() {
                    return Err(FenError::TooManyKings { color });
                }
                pos.put_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        pos.castling_rights = CastlingRights::from_fen_field(parts[2])
            .map_err(|c| FenError::InvalidCastling { char: c })?;

        pos.en_passant = if parts[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq: Square = parts[3].parse().map_err(|_| invalid())?;
            // The target lies behind a pawn that just made a double push
            let (target_rank, pusher_offset) = match pos.side_to_move {
                Color::White => (5, -8),
                Color::Black => (2, 8),
            };
            if sq.rank() != target_rank {
                return Err(invalid());
            }
            let pusher = Square::from_index((sq.index() as isize + pusher_offset) as usize);
            let them = pos.side_to_move.opponent();
            if !pos.is_empty(sq) || pos.piece_at(pusher) != Some((them, Piece::Pawn)) {
                return Err(invalid());
            }
            Some(sq)
        };

        pos.halfmove_clock = parse_counter(parts.get(4), 0)?;
        pos.fullmove_number = parse_counter(parts.get(5), 1)?.max(1);
        Ok(pos)
    }

    /// Parse a board description (FEN).
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the position to a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::from_index(rank * 8 + file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights.to_fen_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Resolve coordinate notation (`e2e4`, `e7e8q`) against the legal moves.
    pub fn parse_move(&mut self, tables: &AttackTables, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_moves(tables)
            .iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .copied()
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse a move and make it in one call.
    pub fn make_move_text(
        &mut self,
        tables: &AttackTables,
        text: &str,
        stack: &mut UndoStack,
    ) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(tables, text)?;
        self.make_move(mv, stack);
        Ok(mv)
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::initialize_tables;

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 12 40",
        ];
        for fen in fens {
            assert_eq!(Position::try_from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_start_fen_matches_new() {
        assert_eq!(Position::try_from_fen(START_FEN).unwrap(), Position::new());
    }

    #[test]
    fn test_fen_black_to_move() {
        let pos =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant(), Some("e3".parse().unwrap()));
    }

    #[test]
    fn test_fen_counters_optional() {
        let pos = Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        let pos = Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 42").unwrap();
        assert_eq!(pos.halfmove_clock(), 42);
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { .. })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Position::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_and_file_counts() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::WrongRankCount { found: 7 })));
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::WrongFileCount { rank: 6, .. })));
        let result = Position::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::WrongFileCount { rank: 7, files: 7 })));
    }

    #[test]
    fn test_fen_error_fields() {
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/K1k5 x - - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w XQ - 0 1"),
            Err(FenError::InvalidCastling { char: 'X' })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - e4 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - x 1"),
            Err(FenError::InvalidCounter { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/KKk5 w - - 0 1"),
            Err(FenError::TooManyKings { color: Color::White })
        ));
    }

    #[test]
    fn test_fen_en_passant_must_follow_a_double_push() {
        let accepted = [
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
            "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1",
        ];
        for fen in accepted {
            assert!(Position::try_from_fen(fen).is_ok(), "{fen}");
        }

        let rejected = [
            // Own pawns behind the target
            "4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1",
            // Rank does not match the side to move
            "4k3/8/8/8/3Pp3/8/8/4K3 w - d3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
            // No pawn behind the target
            "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
            // Enemy piece other than a pawn behind the target
            "4k3/8/8/3nP3/8/8/8/4K3 w - d6 0 1",
            // Target occupied
            "4k3/8/3b4/3pP3/8/8/8/4K3 w - d6 0 1",
        ];
        for fen in rejected {
            assert!(
                matches!(
                    Position::try_from_fen(fen),
                    Err(FenError::InvalidEnPassant { .. })
                ),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_fen_counters_bounded() {
        assert!(matches!(
            Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1"),
            Err(FenError::InvalidCounter { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 65536"),
            Err(FenError::InvalidCounter { .. })
        ));

        // The largest accepted clocks still survive a move and its unmake
        let tables = initialize_tables();
        let mut pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 b - - 65535 65535").unwrap();
        let before = pos.clone();
        let mut stack = UndoStack::new();
        let mv = pos.parse_move(tables, "e8e7").unwrap();
        pos.make_move(mv, &mut stack);
        assert_eq!(pos.halfmove_clock(), 65536);
        assert_eq!(pos.fullmove_number(), 65536);
        pos.unmake_move(mv, &mut stack);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_fen_allows_missing_king() {
        let pos = Position::try_from_fen("4k1RQ/3PPP2/6B1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::White), None);
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn test_parse_move() {
        let tables = initialize_tables();
        let mut pos = Position::new();
        let mv = pos.parse_move(tables, "e2e4").unwrap();
        assert_eq!(mv.from, "e2".parse().unwrap());
        assert_eq!(mv.to, "e4".parse().unwrap());

        let mut pos = Position::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = pos.parse_move(tables, "a7a8n").unwrap();
        assert_eq!(mv.promotion, Some(Piece::Knight));

        let mut pos = Position::try_from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert!(pos.parse_move(tables, "e1g1").unwrap().is_castling);
    }

    #[test]
    fn test_parse_move_errors() {
        let tables = initialize_tables();
        let mut pos = Position::new();
        assert!(matches!(
            pos.parse_move(tables, "e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            pos.parse_move(tables, "z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            pos.parse_move(tables, "e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        let mut pos = Position::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        assert!(matches!(
            pos.parse_move(tables, "a7a8p"),
            Err(MoveParseError::InvalidPromotion { char: 'p' })
        ));
        assert!(matches!(
            pos.parse_move(tables, "a7a8"),
            Err(MoveParseError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_make_move_text() {
        let tables = initialize_tables();
        let mut pos = Position::new();
        let mut stack = UndoStack::new();
        pos.make_move_text(tables, "e2e4", &mut stack).unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(stack.depth(), 1);
        assert!(pos.make_move_text(tables, "e2e4", &mut stack).is_err());
        assert_eq!(stack.depth(), 1);
    }
}
