use shakmaty::{attacks, Chess, Move, Position, Square};
use std::cmp::Ordering;

use crate::psqt::{piece_value, role_index};

#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

impl ScoredMove {
    pub fn new(board: &Chess, mv: Move) -> Self {
        let score = Self::compute_score(board, &mv);
        ScoredMove { mv, score }
    }

    /// Packs the ordering heuristics into one integer, most significant first:
    /// promotion, capture, whether an enemy pawn guards the target, piece-square
    /// gain, and finally the target and origin squares, which make every score
    /// in a position distinct.
    fn compute_score(board: &Chess, mv: &Move) -> i32 {
        let us = board.turn();
        let them = us.other();
        let piece_role = mv.role();
        let from_square = mv.from().unwrap_or(Square::A1);
        let to_square = mv.to();

        let mut score = 0;

        if let Some(promotion_role) = mv.promotion() {
            score += (role_index(promotion_role) as i32) << 26;
        }

        if mv.is_capture() {
            score += 1 << 25;
        }

        let defending_pawns = attacks::pawn_attacks(us, to_square)
            & board.board().pawns()
            & board.board().by_color(them);

        let defending_pawns_score = if defending_pawns.is_empty() {
            6
        } else {
            5 - role_index(piece_role) as i32
        };
        score += defending_pawns_score << 22;

        let move_value = piece_value(us, piece_role, to_square)
            - piece_value(us, piece_role, from_square);
        score += (512 + move_value) << 12;

        score += (to_square as i32) << 6;
        score += from_square as i32;

        score
    }
}

// Scores are unique within a position, so comparing them is a total order
// over its legal moves.
impl PartialEq for ScoredMove {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for ScoredMove {}

impl Ord for ScoredMove {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score)
    }
}

impl PartialOrd for ScoredMove {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Legal moves of one position in canonical order.
///
/// The buffer is reused from ply to ply; every encoder and decoder owns its
/// own instance.
#[derive(Debug, Default)]
pub struct RankedMoves {
    moves: Vec<ScoredMove>,
}

impl RankedMoves {
    pub fn new() -> Self {
        RankedMoves {
            moves: Vec::with_capacity(64),
        }
    }

    /// Replaces the contents with the ranked legal moves of `board`.
    pub fn refresh(&mut self, board: &Chess) {
        self.moves.clear();
        self.moves.extend(
            board
                .legal_moves()
                .into_iter()
                .map(|mv| ScoredMove::new(board, mv)),
        );
        self.moves.sort();
    }

    pub fn get(&self, rank: usize) -> Option<&ScoredMove> {
        self.moves.get(rank)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredMove> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves
    }
}
