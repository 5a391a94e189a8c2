use pgn_reader::{RawHeader, SanPlus, Skip, Visitor};

/// Mainline moves of one game and the headers needed to report on it.
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub white_player: String,
    pub black_player: String,
    pub pgn_moves: Vec<String>,
}

/// Collects mainline SAN from a PGN stream. Games that do not start from the
/// standard position are skipped, since packed games always do.
#[derive(Default)]
pub struct Importer {
    current_game: Game,
    pub skip: bool,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn player_name(value: RawHeader<'_>) -> String {
    value
        .decode_utf8()
        .map(|s| {
            if s == "?" {
                "Unknown".to_string()
            } else {
                s.to_string()
            }
        })
        .unwrap_or_default()
}

impl Visitor for Importer {
    type Result = Game;

    fn begin_game(&mut self) {
        self.current_game = Game::default();
        self.skip = false;
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        match key {
            b"White" => self.current_game.white_player = player_name(value),
            b"Black" => self.current_game.black_player = player_name(value),
            b"FEN" => self.skip = true,
            b"Variant" => {
                self.skip |= !value.as_bytes().eq_ignore_ascii_case(b"standard");
            }
            _ => {}
        }
    }

    fn end_headers(&mut self) -> Skip {
        Skip(self.skip)
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.current_game.pgn_moves.push(san_plus.to_string());
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true) // Skip variations
    }

    fn end_game(&mut self) -> Self::Result {
        std::mem::take(&mut self.current_game)
    }
}
