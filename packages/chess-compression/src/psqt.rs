use shakmaty::{Color, Role, Square};

// Piece-square tables, one row of 64 per role, written from Black's side:
// index 0 is a8, index 63 is h1.
#[rustfmt::skip]
static PSQT: [[i32; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
         50,  50,  50,  50,  50,  50,  50,  50,
         10,  10,  20,  30,  30,  20,  10,  10,
          5,   5,  10,  25,  25,  10,   5,   5,
          0,   0,   0,  20,  21,   0,   0,   0,
          5,  -5, -10,   0,   0, -10,  -5,   5,
          5,  10,  10, -31, -31,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  10,  15,  15,  11,   5, -30,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   0,   0,   0,   0,   0,
          5,  10,  10,  10,  10,  10,  10,   5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          0,   0,   0,   5,   5,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,   5,   5,   5,   0, -10,
         -5,   0,   5,   5,   5,   5,   0,  -5,
          0,   0,   5,   5,   5,   5,   0,  -5,
        -10,   5,   5,   5,   5,   5,   0, -10,
        -10,   0,   5,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King
    [
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -20, -30, -30, -40, -40, -30, -30, -20,
        -10, -20, -20, -20, -20, -20, -20, -10,
         20,  20,   0,   0,   0,   0,  20,  20,
          0,  30,  10,   0,   0,  10,  30,   0,
    ],
];

/// Zero-based role index, pawn first.
pub fn role_index(role: Role) -> usize {
    role as usize - 1
}

pub fn piece_value(turn: Color, role: Role, square: Square) -> i32 {
    let index = match turn {
        Color::White => mirror_square(square as u8),
        Color::Black => square as u8,
    };
    PSQT[role_index(role)][index as usize]
}

fn mirror_square(sq_index: u8) -> u8 {
    sq_index ^ 56
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_color_symmetric() {
        assert_eq!(
            piece_value(Color::White, Role::Knight, Square::F3),
            piece_value(Color::Black, Role::Knight, Square::F6)
        );
        assert_eq!(piece_value(Color::White, Role::Pawn, Square::E2), -31);
        assert_eq!(piece_value(Color::Black, Role::Pawn, Square::E7), -31);
    }

    #[test]
    fn test_central_pawn_push_gains() {
        let gain = piece_value(Color::White, Role::Pawn, Square::E4)
            - piece_value(Color::White, Role::Pawn, Square::E2);
        assert_eq!(gain, 21 + 31);
    }
}
