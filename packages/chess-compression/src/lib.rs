//! Chess game compression library
//!
//! Packs a game, given as a list of moves in SAN, into a dense bit stream by
//! ranking the legal moves of every position and writing the rank of the
//! played move with a fixed prefix-free code. Decoding replays the ranks and
//! also recovers the state needed to continue the game: castling rights, the
//! half-move clock and the hashes of positions that can still repeat.

mod error;
pub mod game_state;
pub mod huffman_code;
pub mod pgn_compress;
mod psqt;
pub mod ranking;
pub mod san;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::CodecError;
pub use pgn_compress::{best_line, explain, DecodeResult, Decoder, EncodedMove, Encoder};

// Re-export types from shakmaty that are used in our public API
pub use shakmaty::{Bitboard, Chess, Piece, Position, Square};

/// Compress a sequence of chess moves (PGN)
///
/// This function takes a slice of SAN move strings and returns the packed bytes.
/// The number of moves has to be stored next to the bytes; it is needed to
/// decode them again.
///
/// # Examples
///
/// ```
/// use chess_compression::compress_pgn;
///
/// let moves = vec!["e4".to_string(), "e5".to_string(), "Nf3".to_string(), "Nc6".to_string()];
/// let compressed = compress_pgn(&moves).unwrap();
/// assert!(!compressed.is_empty());
/// ```
pub fn compress_pgn<S: AsRef<str>>(moves: &[S]) -> Result<Vec<u8>, CodecError> {
    Encoder::new().encode(moves)
}

/// Decompress a sequence of chess moves (PGN)
///
/// This function takes compressed bytes and the number of plies, and returns
/// the moves in SAN.
///
/// # Examples
///
/// ```
/// use chess_compression::{compress_pgn, decompress_pgn};
///
/// let moves = vec!["e4".to_string(), "e5".to_string(), "Nf3".to_string(), "Nc6".to_string()];
/// let compressed = compress_pgn(&moves).unwrap();
/// let decompressed = decompress_pgn(&compressed, moves.len()).unwrap();
/// assert_eq!(moves, decompressed);
/// ```
pub fn decompress_pgn(compressed: &[u8], plies: usize) -> Result<Vec<String>, CodecError> {
    decode_game(compressed, plies).map(|result| result.pgn_moves)
}

/// Decode a game together with the state of its final position
///
/// # Examples
///
/// ```
/// use chess_compression::{compress_pgn, decode_game};
///
/// let compressed = compress_pgn(&["e4", "e5", "Ke2"]).unwrap();
/// let game = decode_game(&compressed, 3).unwrap();
/// assert_eq!(game.last_uci.as_deref(), Some("e1e2"));
/// assert_eq!(game.unmoved_rooks.count(), 2);
/// ```
pub fn decode_game(compressed: &[u8], plies: usize) -> Result<DecodeResult, CodecError> {
    Decoder::new().decode(compressed, plies)
}
