use shakmaty::{
    zobrist::{Zobrist64, ZobristHash},
    Bitboard, Chess, EnPassantMode, Move, Position,
};

/// Bytes kept per position hash.
pub const HASH_BYTES: usize = 3;

/// Derives the state a packed game does not store explicitly: the half-move
/// clock and the positions that can still repeat.
#[derive(Debug, Clone)]
pub struct GameHistory {
    // hashes[0] is the starting position, hashes[i + 1] the position after ply i.
    hashes: Vec<u32>,
    plies: usize,
    last_zeroing: Option<usize>,
    last_irreversible: Option<usize>,
}

impl GameHistory {
    pub fn new(start: &Chess) -> Self {
        GameHistory {
            hashes: vec![position_hash(start)],
            plies: 0,
            last_zeroing: None,
            last_irreversible: None,
        }
    }

    /// Records a ply that has just been played. `rights_before` is the
    /// castling-rights set from before the move.
    pub fn record(&mut self, mv: &Move, rights_before: Bitboard, after: &Chess) {
        let ply = self.plies;
        if mv.is_zeroing() {
            self.last_zeroing = Some(ply);
        }
        if mv.is_zeroing() || after.castles().castling_rights() != rights_before {
            self.last_irreversible = Some(ply);
        }
        self.hashes.push(position_hash(after));
        self.plies += 1;
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        let since = self.last_zeroing.map_or(0, |ply| ply + 1);
        (self.plies - since) as u32
    }

    /// Truncated hashes of every position since the last irreversible ply,
    /// most recent first, three big-endian bytes each.
    pub fn position_hashes(&self) -> Vec<u8> {
        let keep_from = self.last_irreversible.map_or(0, |ply| ply + 1);
        let mut bytes = Vec::with_capacity((self.hashes.len() - keep_from) * HASH_BYTES);
        for hash in self.hashes[keep_from..].iter().rev() {
            bytes.extend_from_slice(&hash.to_be_bytes()[4 - HASH_BYTES..]);
        }
        bytes
    }
}

/// High 32 bits of the polyglot Zobrist key.
pub fn position_hash(board: &Chess) -> u32 {
    let Zobrist64(hash) = board.zobrist_hash(EnPassantMode::Legal);
    (hash >> 32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::san::San;

    fn play(board: &mut Chess, history: &mut GameHistory, san: &str) {
        let mv = san.parse::<San>().unwrap().to_move(&*board).unwrap();
        let rights_before = board.castles().castling_rights();
        board.play_unchecked(&mv);
        history.record(&mv, rights_before, board);
    }

    #[test]
    fn test_fresh_history_keeps_start_hash() {
        let board = Chess::default();
        let history = GameHistory::new(&board);
        assert_eq!(history.halfmove_clock(), 0);
        let hash = position_hash(&board).to_be_bytes();
        assert_eq!(history.position_hashes(), hash[1..].to_vec());
    }

    #[test]
    fn test_stored_bytes_follow_polyglot_keys() {
        // Polyglot keys: 463b96181691fc9c, 823c9b50fd114196, 0756b94461c50fb0.
        let mut board = Chess::default();
        let mut history = GameHistory::new(&board);
        assert_eq!(history.position_hashes(), [0x3b, 0x96, 0x18]);

        play(&mut board, &mut history, "e4");
        assert_eq!(history.position_hashes(), [0x3c, 0x9b, 0x50]);

        // d6 can be taken en passant, so it is part of the key.
        play(&mut board, &mut history, "d5");
        assert_eq!(history.position_hashes(), [0x56, 0xb9, 0x44]);
    }

    #[test]
    fn test_quiet_moves_keep_everything() {
        let mut board = Chess::default();
        let mut history = GameHistory::new(&board);
        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            play(&mut board, &mut history, san);
        }
        assert_eq!(history.halfmove_clock(), 4);
        let hashes = history.position_hashes();
        assert_eq!(hashes.len(), 5 * HASH_BYTES);
        // Knights went out and back: newest equals oldest.
        assert_eq!(hashes[..3], hashes[12..]);
    }

    #[test]
    fn test_capture_resets_clock_and_trims() {
        let mut board = Chess::default();
        let mut history = GameHistory::new(&board);
        for san in ["e4", "d5", "exd5", "Qxd5", "Nc3", "Qa5", "Nf3", "Nf6"] {
            play(&mut board, &mut history, san);
        }
        // Last zeroing ply is Qxd5 at index 3, followed by four quiet moves.
        assert_eq!(history.halfmove_clock(), 4);
        assert_eq!(history.position_hashes().len(), (8 - 3) * HASH_BYTES);
        assert_eq!(
            history.position_hashes()[..3],
            position_hash(&board).to_be_bytes()[1..]
        );
    }

    #[test]
    fn test_king_move_is_irreversible_but_not_zeroing() {
        let mut board = Chess::default();
        let mut history = GameHistory::new(&board);
        for san in ["e4", "e5", "Ke2", "Nc6", "Nf3"] {
            play(&mut board, &mut history, san);
        }
        // Ke2 at index 2 drops both white castling rights.
        assert_eq!(history.halfmove_clock(), 3);
        assert_eq!(history.position_hashes().len(), (5 - 2) * HASH_BYTES);
    }
}
