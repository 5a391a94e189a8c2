use std::collections::HashMap;

use bit_vec::BitVec;
use shakmaty::{Bitboard, CastlingMode, Chess, Move, Piece, Position, Square};
use tracing::{debug, trace};

use crate::{
    error::CodecError,
    game_state::GameHistory,
    huffman_code::{self, Code},
    ranking::RankedMoves,
    san::{self, MoveConstraint},
};

/// What was written for one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMove {
    pub rank: usize,
    pub code: Code,
    pub score: i32,
    pub uci: String,
}

/// Packs a game one ply at a time, starting from the standard position.
pub struct Encoder {
    board: Chess,
    buffer: BitVec,
    legals: RankedMoves,
    plies: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            board: Chess::default(),
            buffer: BitVec::new(),
            legals: RankedMoves::new(),
            plies: 0,
        }
    }

    /// Resolves `pgn_move` in the current position, appends its code and
    /// plays it.
    pub fn encode_move(&mut self, pgn_move: &str) -> Result<EncodedMove, CodecError> {
        let constraint = MoveConstraint::parse(pgn_move, &self.board)?;

        self.legals.refresh(&self.board);
        let rank = san::find_rank(&self.legals, &constraint, pgn_move)?;
        let scored = self
            .legals
            .get(rank)
            .ok_or(CodecError::RankBeyondLegalMoves {
                rank,
                legal: self.legals.len(),
            })?;

        let code = huffman_code::write_rank(&mut self.buffer, rank)?;
        let encoded = EncodedMove {
            rank,
            code,
            score: scored.score,
            uci: scored.mv.to_uci(CastlingMode::Standard).to_string(),
        };
        trace!(ply = self.plies, san = pgn_move, rank, bits = code.len, "encoded move");

        self.board.play_unchecked(&scored.mv);
        self.plies += 1;
        Ok(encoded)
    }

    pub fn plies(&self) -> usize {
        self.plies
    }

    /// The position after every move encoded so far.
    pub fn position(&self) -> &Chess {
        &self.board
    }

    pub fn finalize(self) -> BitVec {
        debug!(
            plies = self.plies,
            bits = self.buffer.len(),
            "finished encoding game"
        );
        self.buffer
    }

    /// Encodes a whole game and returns the packed bytes.
    pub fn encode<S: AsRef<str>>(mut self, pgn_moves: &[S]) -> Result<Vec<u8>, CodecError> {
        for pgn_move in pgn_moves {
            self.encode_move(pgn_move.as_ref())?;
        }
        Ok(self.finalize().to_bytes())
    }
}

/// Everything recovered from a packed game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// Moves in SAN, with check and mate markers.
    pub pgn_moves: Vec<String>,
    /// Occupied squares of the final position.
    pub pieces: HashMap<Square, Piece>,
    /// Rooks that can still castle.
    pub unmoved_rooks: Bitboard,
    pub halfmove_clock: u32,
    /// Three bytes per position since the last irreversible move, newest first.
    pub position_hashes: Vec<u8>,
    /// UCI of the final move, if any move was decoded.
    pub last_uci: Option<String>,
}

/// Unpacks games. Holds a reusable move buffer, so one decoder should not be
/// shared between threads.
#[derive(Default)]
pub struct Decoder {
    legals: RankedMoves,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            legals: RankedMoves::new(),
        }
    }

    /// Decodes exactly `plies` moves from `data`.
    pub fn decode(&mut self, data: &[u8], plies: usize) -> Result<DecodeResult, CodecError> {
        // The shortest code is two bits long.
        if plies > data.len().saturating_mul(4) {
            return Err(CodecError::UnexpectedEndOfStream);
        }

        let bits = BitVec::from_bytes(data);
        let mut reader = bits.iter();

        let mut output: Vec<String> = Vec::with_capacity(plies);
        let mut board = Chess::default();
        let mut history = GameHistory::new(&board);
        let mut last_uci = None;

        for ply in 0..=plies {
            if ply > 0 || ply < plies {
                self.legals.refresh(&board);
            }

            // The suffix of a move depends on the position it leads to.
            if ply > 0 && board.is_check() {
                if let Some(previous) = output.last_mut() {
                    previous.push(if self.legals.is_empty() { '#' } else { '+' });
                }
            }

            if ply < plies {
                let rank = huffman_code::read_rank(&mut reader)?;
                let mv: Move = self
                    .legals
                    .get(rank)
                    .ok_or(CodecError::RankBeyondLegalMoves {
                        rank,
                        legal: self.legals.len(),
                    })?
                    .mv
                    .clone();

                let text = san::render(&mv, self.legals.as_slice());
                trace!(ply, rank, san = %text, "decoded move");
                output.push(text);

                let rights_before = board.castles().castling_rights();
                board.play_unchecked(&mv);
                history.record(&mv, rights_before, &board);

                if ply + 1 == plies {
                    last_uci = Some(mv.to_uci(CastlingMode::Standard).to_string());
                }
            }
        }

        debug!(plies, "finished decoding game");

        let pieces = board
            .board()
            .occupied()
            .into_iter()
            .filter_map(|sq| board.board().piece_at(sq).map(|piece| (sq, piece)))
            .collect();

        Ok(DecodeResult {
            pgn_moves: output,
            pieces,
            unmoved_rooks: board.castles().castling_rights(),
            halfmove_clock: history.halfmove_clock(),
            position_hashes: history.position_hashes(),
            last_uci,
        })
    }
}

/// Encodes `pgn_moves` and reports rank, code and score of every ply.
pub fn explain<S: AsRef<str>>(pgn_moves: &[S]) -> Result<Vec<EncodedMove>, CodecError> {
    let mut encoder = Encoder::new();
    pgn_moves
        .iter()
        .map(|pgn_move| encoder.encode_move(pgn_move.as_ref()))
        .collect()
}

/// Plays the top-ranked move `plies` times from the starting position,
/// stopping early when the game is over.
pub fn best_line(plies: usize) -> Vec<EncodedMove> {
    let mut board = Chess::default();
    let mut legals = RankedMoves::new();
    let mut line = Vec::with_capacity(plies);

    for _ in 0..plies {
        legals.refresh(&board);
        let Some(best) = legals.get(0) else {
            break;
        };
        line.push(EncodedMove {
            rank: 0,
            code: huffman_code::CODES[0],
            score: best.score,
            uci: best.mv.to_uci(CastlingMode::Standard).to_string(),
        });
        board.play_unchecked(&best.mv);
    }

    line
}
