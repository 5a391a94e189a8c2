use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed move text: {0}")]
    MalformedSan(String),
    #[error("No legal move matches {0}")]
    IllegalMove(String),
    #[error("Move {0} matches more than one legal move")]
    AmbiguousMove(String),
    #[error("Rank {0} has no code in the move table")]
    RankOutOfRange(usize),
    #[error("Bit stream ended in the middle of a move")]
    UnexpectedEndOfStream,
    #[error("Bit stream does not match any move code")]
    CorruptStream,
    #[error("Decoded rank {rank} but the position only has {legal} legal moves")]
    RankBeyondLegalMoves { rank: usize, legal: usize },
}
