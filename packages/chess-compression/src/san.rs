//! Matching SAN text against ranked legal moves, and rendering ranked moves
//! back to SAN.

use shakmaty::{
    san::{San, SanPlus},
    Bitboard, CastlingSide, Chess, Color, Move, Position, Rank, Role, Square,
};

use crate::{error::CodecError, ranking::RankedMoves, ranking::ScoredMove};

/// What a SAN token says about the move it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveConstraint {
    pub role: Role,
    /// Squares the move may start from.
    pub from: Bitboard,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveConstraint {
    /// Parses `text` and resolves it into a constraint for the side to move
    /// in `board`. A trailing check or mate marker is accepted and ignored.
    pub fn parse(text: &str, board: &Chess) -> Result<Self, CodecError> {
        let san_plus = SanPlus::from_ascii(text.as_bytes())
            .map_err(|_| CodecError::MalformedSan(text.to_string()))?;

        match san_plus.san {
            San::Normal {
                role,
                file,
                rank,
                to,
                promotion,
                ..
            } => {
                let mut from = Bitboard::FULL;
                if let Some(file) = file {
                    from &= Bitboard::from_file(file);
                }
                if let Some(rank) = rank {
                    from &= Bitboard::from_rank(rank);
                }
                Ok(MoveConstraint {
                    role,
                    from,
                    to,
                    promotion,
                })
            }
            San::Castle(side) => {
                let us = board.turn();
                let back_rank = match us {
                    Color::White => Rank::First,
                    Color::Black => Rank::Eighth,
                };
                let rooks =
                    board.board().rooks() & board.us() & Bitboard::from_rank(back_rank);
                let rook = match side {
                    CastlingSide::KingSide => rooks.last(),
                    CastlingSide::QueenSide => rooks.first(),
                }
                .ok_or_else(|| CodecError::IllegalMove(text.to_string()))?;

                Ok(MoveConstraint {
                    role: Role::King,
                    from: board.board().kings() & board.us(),
                    to: rook,
                    promotion: None,
                })
            }
            San::Put { .. } | San::Null => Err(CodecError::MalformedSan(text.to_string())),
        }
    }

    pub fn matches(&self, mv: &Move) -> bool {
        mv.role() == self.role
            && mv.to() == self.to
            && mv.promotion() == self.promotion
            && mv.from().is_some_and(|from| self.from.contains(from))
    }
}

/// Finds the rank of the single legal move satisfying `constraint`.
pub fn find_rank(
    legals: &RankedMoves,
    constraint: &MoveConstraint,
    text: &str,
) -> Result<usize, CodecError> {
    let mut found = None;
    for (rank, legal) in legals.iter().enumerate() {
        if constraint.matches(&legal.mv) {
            if found.is_some() {
                return Err(CodecError::AmbiguousMove(text.to_string()));
            }
            found = Some(rank);
        }
    }
    found.ok_or_else(|| CodecError::IllegalMove(text.to_string()))
}

/// Renders `mv` in SAN without a check suffix. `legals` must be the ranked
/// moves of the position `mv` was drawn from.
pub fn render(mv: &Move, legals: &[ScoredMove]) -> String {
    let (role, from, to) = match *mv {
        Move::Castle { king, rook } => {
            return if (king as u8) < (rook as u8) {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }
        Move::Put { .. } => return "--".to_string(),
        Move::Normal { role, from, to, .. } => (role, from, to),
        Move::EnPassant { from, to } => (Role::Pawn, from, to),
    };

    let mut san = String::with_capacity(7);

    if role != Role::Pawn {
        san.push(role.upper_char());

        let others: Vec<Square> = legals
            .iter()
            .map(|other| &other.mv)
            .filter(|other| other.role() == role && other.to() == to)
            .filter_map(|other| other.from())
            .filter(|&other_from| other_from != from)
            .collect();

        let mut file = false;
        let mut rank = false;
        if !others.is_empty() {
            if others.iter().any(|sq| sq.rank() == from.rank()) {
                file = true;
            }
            if others.iter().any(|sq| sq.file() == from.file()) {
                rank = true;
            } else {
                file = true;
            }
        }

        if file {
            san.push(from.file().char());
        }
        if rank {
            san.push(from.rank().char());
        }
    } else if mv.is_capture() {
        san.push(from.file().char());
    }

    if mv.is_capture() {
        san.push('x');
    }

    san.push(to.file().char());
    san.push(to.rank().char());

    if let Some(promotion) = mv.promotion() {
        san.push('=');
        san.push(promotion.upper_char());
    }

    san
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{fen::Fen, CastlingMode, File};

    fn position(fen: &str) -> Chess {
        Fen::from_ascii(fen.as_bytes())
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap()
    }

    fn ranked(board: &Chess) -> RankedMoves {
        let mut legals = RankedMoves::new();
        legals.refresh(board);
        legals
    }

    fn resolve(board: &Chess, text: &str) -> Result<Move, CodecError> {
        let legals = ranked(board);
        let constraint = MoveConstraint::parse(text, board)?;
        let rank = find_rank(&legals, &constraint, text)?;
        Ok(legals.get(rank).unwrap().mv.clone())
    }

    fn rendered(board: &Chess, text: &str) -> String {
        let legals = ranked(board);
        let mv = resolve(board, text).unwrap();
        render(&mv, legals.as_slice())
    }

    #[test]
    fn test_parse_file_and_rank_filters() {
        let board = Chess::default();
        let constraint = MoveConstraint::parse("Nb1c3", &board).unwrap();
        assert_eq!(constraint.role, Role::Knight);
        assert_eq!(constraint.to, Square::C3);
        assert_eq!(
            constraint.from,
            Bitboard::from_file(File::B) & Bitboard::from_rank(Rank::First)
        );
        assert_eq!(constraint.promotion, None);
    }

    #[test]
    fn test_parse_ignores_suffix_and_capture_marker() {
        let board = Chess::default();
        let plain = MoveConstraint::parse("exd5", &board).unwrap();
        let checked = MoveConstraint::parse("exd5+", &board).unwrap();
        assert_eq!(plain, checked);
        assert_eq!(plain.role, Role::Pawn);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let board = Chess::default();
        for text in ["", "Zf3", "e9", "hello", "--"] {
            assert!(
                matches!(
                    MoveConstraint::parse(text, &board),
                    Err(CodecError::MalformedSan(_))
                ),
                "{:?} should be malformed",
                text
            );
        }
    }

    #[test]
    fn test_single_knight_needs_no_disambiguation() {
        let board = position("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        assert_eq!(rendered(&board, "Nf3"), "Nf3");
    }

    #[test]
    fn test_file_disambiguation() {
        // Knights on b1 and f3 can both reach d2.
        let board = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPP2PPP/RNBQKB1R w KQkq - 0 4");
        assert_eq!(rendered(&board, "Nbd2"), "Nbd2");
        assert_eq!(rendered(&board, "Nfd2"), "Nfd2");
        assert!(matches!(
            resolve(&board, "Nd2"),
            Err(CodecError::AmbiguousMove(_))
        ));
    }

    #[test]
    fn test_rank_disambiguation_when_files_collide() {
        // Rooks on a1 and a5 can both reach a3.
        let board = position("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(rendered(&board, "R1a3"), "R1a3");
        assert_eq!(rendered(&board, "R5a3"), "R5a3");
    }

    #[test]
    fn test_file_and_rank_with_three_queens() {
        // Queens on a1, a3 and c1 all reach b2.
        let board = position("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1");
        assert_eq!(rendered(&board, "Qa1b2"), "Qa1b2");
        // Only the file is shared, so the rank alone identifies it.
        assert_eq!(rendered(&board, "Qa3b2"), "Q3b2");
        assert_eq!(rendered(&board, "Qc1b2"), "Qcb2");
    }

    #[test]
    fn test_pawn_capture_and_promotion() {
        let board = position("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(rendered(&board, "exd8=Q"), "exd8=Q");
        assert_eq!(rendered(&board, "e8=N"), "e8=N");
        assert!(matches!(
            resolve(&board, "e8"),
            Err(CodecError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_en_passant_renders_as_pawn_capture() {
        let board = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let mv = resolve(&board, "exf6").unwrap();
        assert!(mv.is_en_passant());
        assert_eq!(rendered(&board, "exf6"), "exf6");
    }

    #[test]
    fn test_castling_picks_rook_by_file() {
        let board = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = resolve(&board, "O-O").unwrap();
        let long = resolve(&board, "O-O-O").unwrap();
        assert_eq!(short.to(), Square::H1);
        assert_eq!(long.to(), Square::A1);
        assert_eq!(rendered(&board, "O-O"), "O-O");
        assert_eq!(rendered(&board, "O-O-O"), "O-O-O");
    }

    #[test]
    fn test_black_castling_uses_eighth_rank() {
        let board = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert_eq!(resolve(&board, "O-O").unwrap().to(), Square::H8);
        assert_eq!(resolve(&board, "O-O-O+").unwrap().to(), Square::A8);
    }

    #[test]
    fn test_castling_without_rook_is_illegal() {
        let board = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(
            resolve(&board, "O-O"),
            Err(CodecError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_unreachable_square_is_illegal() {
        let board = Chess::default();
        assert!(matches!(
            resolve(&board, "Nd4"),
            Err(CodecError::IllegalMove(_))
        ));
    }
}
