use std::fmt;

use chess_compression::{compress_pgn, decode_game, CodecError};
use thiserror::Error;
use tracing::warn;

use crate::importer::Game;

/// Totals over every game packed from one PGN file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackStats {
    pub games: usize,
    pub skipped: usize,
    pub failed: usize,
    pub plies: usize,
    pub bytes: usize,
    pub notation_differences: usize,
}

impl PackStats {
    /// Packs `game`, unpacks it again and checks that re-packing the result
    /// gives the same bytes.
    pub fn add_game(&mut self, game_number: usize, game: &Game) {
        match round_trip(game) {
            Ok(outcome) => {
                self.games += 1;
                self.plies += game.pgn_moves.len();
                self.bytes += outcome.bytes;
                if outcome.notation_differences > 0 {
                    self.notation_differences += 1;
                }
            }
            Err(e) => {
                self.failed += 1;
                warn!(
                    game = game_number,
                    white = %game.white_player,
                    black = %game.black_player,
                    "could not pack game: {}",
                    e
                );
            }
        }
    }

    pub fn bits_per_ply(&self) -> f64 {
        if self.plies == 0 {
            0.0
        } else {
            (self.bytes * 8) as f64 / self.plies as f64
        }
    }
}

impl fmt::Display for PackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games packed:         {}", self.games)?;
        writeln!(f, "games skipped:        {}", self.skipped)?;
        writeln!(f, "games failed:         {}", self.failed)?;
        writeln!(f, "plies:                {}", self.plies)?;
        writeln!(f, "bytes:                {}", self.bytes)?;
        writeln!(f, "bits per ply:         {:.2}", self.bits_per_ply())?;
        write!(f, "notation differences: {}", self.notation_differences)
    }
}

struct RoundTrip {
    bytes: usize,
    notation_differences: usize,
}

#[derive(Error, Debug)]
enum RoundTripError {
    #[error("{0}")]
    Codec(#[from] CodecError),
    #[error("re-packed bytes differ")]
    Mismatch,
}

fn round_trip(game: &Game) -> Result<RoundTrip, RoundTripError> {
    let packed = compress_pgn(&game.pgn_moves)?;
    let decoded = decode_game(&packed, game.pgn_moves.len())?;

    // Over-disambiguated or unmarked input reads back in canonical form.
    let notation_differences = game
        .pgn_moves
        .iter()
        .zip(&decoded.pgn_moves)
        .filter(|(original, decoded)| original != decoded)
        .count();

    if compress_pgn(&decoded.pgn_moves)? != packed {
        return Err(RoundTripError::Mismatch);
    }

    Ok(RoundTrip {
        bytes: packed.len(),
        notation_differences,
    })
}
