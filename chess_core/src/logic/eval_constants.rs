// Piece Values
pub const VAL_PAWN: i32 = 20;
pub const VAL_KNIGHT: i32 = 60;
pub const VAL_BISHOP: i32 = 61;
pub const VAL_ROOK: i32 = 100;
pub const VAL_QUEEN: i32 = 180;
pub const VAL_KING: i32 = 1800;

// Piece-Square Tables, written from White's side.
// Table row = board row: row 0 is Black's back rank, row 7 is White's.
// Black reads the table upside down.

#[rustfmt::skip]
pub const PST_PAWN: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 10,  10,  10,  10,  10,  10,  10,  10], // One step from promotion
    [  2,   2,   4,   6,   6,   4,   2,   2],
    [  1,   1,   2,   5,   5,   2,   1,   1],
    [  0,   0,   0,   5,   5,   0,   0,   0],
    [  1,   0,  -2,   0,   0,  -2,   0,   1],
    [  1,   2,   2,  -6,  -6,   2,   2,   1], // Home row: push the centre
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
pub const PST_KNIGHT: [[i32; 8]; 8] = [
    [-10,  -8,  -6,  -6,  -6,  -6,  -8, -10],
    [ -8,  -4,   0,   1,   1,   0,  -4,  -8],
    [ -6,   1,   2,   3,   3,   2,   1,  -6],
    [ -6,   1,   3,   3,   3,   3,   1,  -6],
    [ -6,   1,   3,   3,   3,   3,   1,  -6],
    [ -6,   1,   4,   3,   3,   4,   1,  -6],
    [ -8,  -4,   0,   2,   2,   0,  -4,  -8],
    [-10,  -8,  -6,  -6,  -6,  -6,  -8, -10],
];

#[rustfmt::skip]
pub const PST_BISHOP: [[i32; 8]; 8] = [
    [ -4,  -2,  -2,  -2,  -2,  -2,  -2,  -4],
    [ -2,   0,   0,   0,   0,   0,   0,  -2],
    [ -2,   0,   1,   2,   2,   1,   0,  -2],
    [ -2,   1,   1,   2,   2,   1,   1,  -2],
    [ -2,   0,   3,   2,   2,   3,   0,  -2],
    [ -2,   2,   2,   2,   2,   2,   2,  -2],
    [ -2,   3,   0,   0,   0,   0,   3,  -2],
    [ -4,  -2,  -2,  -2,  -2,  -2,  -2,  -4],
];

#[rustfmt::skip]
pub const PST_ROOK: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   2,   2,   2,   2,   2,   2,   1], // Seventh rank
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [  0,   0,   0,   1,   1,   0,   0,   0],
];

#[rustfmt::skip]
pub const PST_QUEEN: [[i32; 8]; 8] = [
    [ -4,  -2,  -2,  -1,  -1,  -2,  -2,  -4],
    [ -2,   0,   0,   0,   0,   0,   0,  -2],
    [ -2,   0,   1,   1,   1,   1,   0,  -2],
    [ -1,   0,   1,   1,   1,   1,   0,  -1],
    [ -1,   0,   1,   1,   1,   1,   0,  -1],
    [ -2,   1,   1,   1,   1,   1,   0,  -2],
    [ -2,   0,   1,   0,   0,   0,   0,  -2],
    [ -4,  -2,  -2,  -1,  -1,  -2,  -2,  -4],
];

// Bottom row favours a castled king on either wing.
#[rustfmt::skip]
pub const PST_KING: [[i32; 8]; 8] = [
    [ -6,  -8,  -8, -10, -10,  -8,  -8,  -6],
    [ -6,  -8,  -8, -10, -10,  -8,  -8,  -6],
    [ -6,  -8,  -8, -10, -10,  -8,  -8,  -6],
    [ -6,  -8,  -8, -10, -10,  -8,  -8,  -6],
    [ -4,  -6,  -6,  -8,  -8,  -6,  -6,  -4],
    [ -2,  -4,  -4,  -4,  -4,  -4,  -4,  -2],
    [  1,   1,   0,   0,   0,   0,   1,   1],
    [  4,   6,   3,   0,   0,   2,   6,   4],
];

use crate::logic::board::{Color, PieceKind, BOARD_SIZE};

pub fn get_pst_value(kind: PieceKind, color: Color, row: usize, col: usize) -> i32 {
    let r = match color {
        Color::White => row,
        Color::Black => (BOARD_SIZE - 1).saturating_sub(row),
    };

    let table = match kind {
        PieceKind::King => &PST_KING,
        PieceKind::Queen => &PST_QUEEN,
        PieceKind::Rook => &PST_ROOK,
        PieceKind::Bishop => &PST_BISHOP,
        PieceKind::Knight => &PST_KNIGHT,
        PieceKind::Pawn => &PST_PAWN,
    };
    table.get(r).and_then(|row| row.get(col)).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_mirror_between_colors() {
        for kind in PieceKind::ALL {
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    assert_eq!(
                        get_pst_value(kind, Color::White, row, col),
                        get_pst_value(kind, Color::Black, BOARD_SIZE - 1 - row, col),
                        "{kind:?} at {row},{col}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_pawn_prefers_advancing() {
        // White pawn one step from promotion vs. on its home row.
        assert!(
            get_pst_value(PieceKind::Pawn, Color::White, 1, 0)
                > get_pst_value(PieceKind::Pawn, Color::White, 6, 0)
        );
        // Same for Black, which advances towards row 7.
        assert!(
            get_pst_value(PieceKind::Pawn, Color::Black, 6, 0)
                > get_pst_value(PieceKind::Pawn, Color::Black, 1, 0)
        );
    }

    #[test]
    fn test_castled_king_bonus() {
        assert_eq!(get_pst_value(PieceKind::King, Color::White, 7, 6), 6);
        assert_eq!(get_pst_value(PieceKind::King, Color::Black, 0, 6), 6);
        assert_eq!(get_pst_value(PieceKind::King, Color::White, 7, 4), 0);
    }
}
