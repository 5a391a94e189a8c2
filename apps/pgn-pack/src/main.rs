//! pgn-pack - packs PGN games into move-rank bit streams and back.

mod importer;
mod stats;

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chess_compression::{best_line, compress_pgn, decode_game, explain, EncodedMove, Piece, Square};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use importer::Importer;
use pgn_reader::BufferedReader;
use shakmaty::{File as BoardFile, Rank};
use stats::PackStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Packs chess games into move-rank bit streams.
#[derive(Parser)]
#[command(name = "pgn-pack")]
#[command(about = "Packs chess games into move-rank bit streams and back")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack every game of a PGN file and report the result
    Stats {
        path: PathBuf,

        /// Stop after this many games
        #[arg(long, env = "PGN_PACK_MAX_GAMES")]
        max_games: Option<usize>,

        /// Log progress every this many games
        #[arg(long, env = "PGN_PACK_PROGRESS_EVERY", default_value = "20000")]
        progress_every: usize,
    },
    /// Pack a list of SAN moves and print the bytes as hex
    Encode {
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Unpack hex bytes holding the given number of plies
    Decode { hex: String, plies: usize },
    /// Show the rank, code and score of every move
    Explain {
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Print the line that always plays the top-ranked move
    Line { plies: usize },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().command {
        Command::Stats {
            path,
            max_games,
            progress_every,
        } => run_stats(&path, max_games, progress_every),
        Command::Encode { moves } => {
            let packed = compress_pgn(&moves).context("failed to pack moves")?;
            println!("plies: {}", moves.len());
            println!("bytes: {}", to_hex(&packed));
            Ok(())
        }
        Command::Decode { hex, plies } => run_decode(&hex, plies),
        Command::Explain { moves } => {
            let explained = explain(&moves).context("failed to pack moves")?;
            print_moves(&explained);
            Ok(())
        }
        Command::Line { plies } => {
            print_moves(&best_line(plies));
            Ok(())
        }
    }
}

fn run_stats(
    path: &Path,
    max_games: Option<usize>,
    progress_every: usize,
) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufferedReader::new(file);
    info!("Packing games from {}", path.display());

    let mut stats = PackStats::default();
    let mut read_games: usize = 0;
    loop {
        if max_games.is_some_and(|max| read_games >= max) {
            break;
        }

        let mut importer = Importer::new();
        let Some(game) = reader
            .read_game(&mut importer)
            .with_context(|| format!("failed to read game {}", read_games + 1))?
        else {
            break;
        };
        read_games += 1;

        if importer.skip {
            stats.skipped += 1;
        } else {
            stats.add_game(read_games, &game);
        }

        if progress_every > 0 && read_games % progress_every == 0 {
            info!("Read {} games", read_games);
        }
    }

    info!("Packed {} of {} games", stats.games, read_games);
    println!("{}", stats);
    Ok(())
}

fn run_decode(hex: &str, plies: usize) -> anyhow::Result<()> {
    let packed = from_hex(hex)?;
    let decoded = decode_game(&packed, plies).context("failed to unpack game")?;

    println!("moves:          {}", decoded.pgn_moves.join(" "));
    println!("halfmove clock: {}", decoded.halfmove_clock);
    let rooks: Vec<String> = decoded
        .unmoved_rooks
        .into_iter()
        .map(|sq| sq.to_string())
        .collect();
    println!("unmoved rooks:  {}", rooks.join(" "));
    let hashes: Vec<String> = decoded
        .position_hashes
        .chunks(chess_compression::game_state::HASH_BYTES)
        .map(to_hex)
        .collect();
    println!("hashes:         {}", hashes.join(" "));
    println!(
        "last move:      {}",
        decoded.last_uci.as_deref().unwrap_or("-")
    );
    println!();
    print!("{}", diagram(&decoded.pieces));
    Ok(())
}

fn print_moves(moves: &[EncodedMove]) {
    for (ply, encoded) in moves.iter().enumerate() {
        println!(
            "{:>4}  {:<6} rank {:>3}  code {:<12} score {:>10}",
            ply + 1,
            encoded.uci,
            encoded.rank,
            encoded.code.to_bit_string(),
            encoded.score
        );
    }
}

fn diagram(pieces: &HashMap<Square, Piece>) -> String {
    let mut out = String::with_capacity(8 * 9);
    for rank in (0..8).rev() {
        for file in 0..8 {
            let square = Square::from_coords(BoardFile::new(file), Rank::new(rank));
            out.push(pieces.get(&square).map_or('.', |piece| piece.char()));
        }
        out.push('\n');
    }
    out
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let text = text.trim();
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!("{:?} is not a hex string", text);
    }
    if text.len() % 2 != 0 {
        bail!("hex string has an odd number of digits");
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .with_context(|| format!("invalid hex at offset {}", i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_compression::{Chess, Position};

    #[test]
    fn test_hex_round_trip() {
        let bytes = vec![0x00, 0x7f, 0xc0, 0xff];
        assert_eq!(to_hex(&bytes), "007fc0ff");
        assert_eq!(from_hex("007fC0ff").unwrap(), bytes);
        assert!(from_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_hex_is_rejected() {
        assert!(from_hex("abc").is_err());
        assert!(from_hex("zz").is_err());
        assert!(from_hex("é0").is_err());
        assert!(from_hex("+f").is_err());
    }

    #[test]
    fn test_start_position_diagram() {
        let board = Chess::default();
        let pieces: HashMap<Square, Piece> = board
            .board()
            .occupied()
            .into_iter()
            .filter_map(|sq| board.board().piece_at(sq).map(|piece| (sq, piece)))
            .collect();
        let drawn = diagram(&pieces);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines[0], "rnbqkbnr");
        assert_eq!(lines[3], "........");
        assert_eq!(lines[7], "RNBQKBNR");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["pgn-pack", "decode", "c0", "2"]).unwrap();
        assert!(matches!(args.command, Command::Decode { plies: 2, .. }));
        assert!(Args::try_parse_from(["pgn-pack", "encode"]).is_err());
    }
}
