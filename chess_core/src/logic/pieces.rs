//! Per-kind movement rules.
//!
//! `reachable_squares` yields pseudo-legal destinations: geometry and occupancy only, with no
//! regard for the mover's king. `attacked_squares` is the attack pattern used for check
//! detection. It differs for pawns (diagonals only, empty or not) and kings (no castling).

use crate::logic::board::{Board, Color, Piece, PieceKind, Square, KING_HOME_COL};
use crate::logic::game::EnPassant;

const ROOK_DIRS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KING_OFFSETS: [(isize, isize); 8] = QUEEN_DIRS;
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [Self; 2] = [Self::KingSide, Self::QueenSide];

    pub const fn index(self) -> usize {
        match self {
            Self::KingSide => 0,
            Self::QueenSide => 1,
        }
    }

    pub const fn rook_col(self) -> usize {
        match self {
            Self::KingSide => 7,
            Self::QueenSide => 0,
        }
    }

    pub const fn king_target_col(self) -> usize {
        match self {
            Self::KingSide => 6,
            Self::QueenSide => 2,
        }
    }

    pub const fn rook_target_col(self) -> usize {
        match self {
            Self::KingSide => 5,
            Self::QueenSide => 3,
        }
    }

    /// Column the king crosses on its way to the target.
    pub const fn king_pass_col(self) -> usize {
        self.rook_target_col()
    }

    pub const fn from_king_target(col: usize) -> Option<Self> {
        match col {
            6 => Some(Self::KingSide),
            2 => Some(Self::QueenSide),
            _ => None,
        }
    }

    /// Columns strictly between king and rook.
    fn between_cols(self) -> std::ops::Range<usize> {
        match self {
            Self::KingSide => (KING_HOME_COL + 1)..7,
            Self::QueenSide => 1..KING_HOME_COL,
        }
    }
}

/// King and the given rook both stand unmoved on their home squares.
pub fn has_castling_rights(board: &Board, color: Color, side: CastleSide) -> bool {
    let row = color.home_row();
    let unmoved = |col: usize, kind: PieceKind| {
        board
            .get(Square::new_unchecked(row, col))
            .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
    };
    unmoved(KING_HOME_COL, PieceKind::King) && unmoved(side.rook_col(), PieceKind::Rook)
}

/// Castling rights hold and nothing stands between king and rook.
/// Check-related clauses are left to the legality filter.
pub fn can_castle_geometrically(board: &Board, color: Color, side: CastleSide) -> bool {
    let row = color.home_row();
    has_castling_rights(board, color, side)
        && side
            .between_cols()
            .all(|col| !board.is_occupied(Square::new_unchecked(row, col)))
}

/// A king moving two files along its row.
pub fn is_castling_move(piece: &Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King && from.row == to.row && from.col.abs_diff(to.col) == 2
}

impl Piece {
    /// Pseudo-legal destinations from `from`. Never off-board, never onto a friendly piece.
    pub fn reachable_squares(&self, from: Square, board: &Board) -> Vec<Square> {
        let mut out = Vec::with_capacity(28);
        match self.kind {
            PieceKind::Queen => self.slide(from, board, &QUEEN_DIRS, &mut out),
            PieceKind::Rook => self.slide(from, board, &ROOK_DIRS, &mut out),
            PieceKind::Bishop => self.slide(from, board, &BISHOP_DIRS, &mut out),
            PieceKind::Knight => self.leap(from, board, &KNIGHT_OFFSETS, &mut out),
            PieceKind::King => {
                self.leap(from, board, &KING_OFFSETS, &mut out);
                self.castling_squares(from, board, &mut out);
            }
            PieceKind::Pawn => self.pawn_squares(from, board, &mut out),
        }
        out
    }

    /// Squares this piece attacks from `from`. Blockers are included whatever their color.
    pub fn attacked_squares(&self, from: Square, board: &Board) -> Vec<Square> {
        let mut out = Vec::with_capacity(28);
        match self.kind {
            PieceKind::Queen => Self::rays(from, board, &QUEEN_DIRS, &mut out),
            PieceKind::Rook => Self::rays(from, board, &ROOK_DIRS, &mut out),
            PieceKind::Bishop => Self::rays(from, board, &BISHOP_DIRS, &mut out),
            PieceKind::Knight => Self::offsets(from, &KNIGHT_OFFSETS, &mut out),
            PieceKind::King => Self::offsets(from, &KING_OFFSETS, &mut out),
            PieceKind::Pawn => {
                let fwd = self.color.forward();
                Self::offsets(from, &[(fwd, -1), (fwd, 1)], &mut out);
            }
        }
        out
    }

    pub fn attacks(&self, from: Square, target: Square, board: &Board) -> bool {
        self.attacked_squares(from, board).contains(&target)
    }

    /// Whether this pawn, standing on `from`, may take en passant through `window`.
    pub fn can_capture_en_passant(&self, from: Square, window: Option<EnPassant>) -> bool {
        let Some(ep) = window else {
            return false;
        };
        self.kind == PieceKind::Pawn
            && ep.color != self.color
            && from.offset(self.color.forward(), 0).map(|s| s.row) == Some(ep.target.row)
            && from.col.abs_diff(ep.target.col) == 1
    }

    fn can_land_on(&self, board: &Board, square: Square) -> bool {
        board.get(square).map_or(true, |p| p.color != self.color)
    }

    fn offsets(from: Square, offsets: &[(isize, isize)], out: &mut Vec<Square>) {
        out.extend(offsets.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)));
    }

    fn slide(&self, from: Square, board: &Board, dirs: &[(isize, isize)], out: &mut Vec<Square>) {
        for &(dr, dc) in dirs {
            let mut current = from;
            while let Some(next) = current.offset(dr, dc) {
                match board.get(next) {
                    None => out.push(next),
                    Some(other) => {
                        if other.color != self.color {
                            out.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    fn rays(from: Square, board: &Board, dirs: &[(isize, isize)], out: &mut Vec<Square>) {
        for &(dr, dc) in dirs {
            let mut current = from;
            while let Some(next) = current.offset(dr, dc) {
                out.push(next);
                if board.is_occupied(next) {
                    break;
                }
                current = next;
            }
        }
    }

    fn leap(&self, from: Square, board: &Board, offsets: &[(isize, isize)], out: &mut Vec<Square>) {
        out.extend(
            offsets
                .iter()
                .filter_map(|&(dr, dc)| from.offset(dr, dc))
                .filter(|&to| self.can_land_on(board, to)),
        );
    }

    fn castling_squares(&self, from: Square, board: &Board, out: &mut Vec<Square>) {
        if self.has_moved || from != Square::new_unchecked(self.color.home_row(), KING_HOME_COL) {
            return;
        }
        for side in CastleSide::ALL {
            if can_castle_geometrically(board, self.color, side) {
                out.push(Square::new_unchecked(from.row, side.king_target_col()));
            }
        }
    }

    fn pawn_squares(&self, from: Square, board: &Board, out: &mut Vec<Square>) {
        let fwd = self.color.forward();

        if let Some(one) = from.offset(fwd, 0).filter(|&s| !board.is_occupied(s)) {
            out.push(one);
            if !self.has_moved {
                if let Some(two) = one.offset(fwd, 0).filter(|&s| !board.is_occupied(s)) {
                    out.push(two);
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(target) = from.offset(fwd, dc) {
                if board.get(target).is_some_and(|p| p.color != self.color) {
                    out.push(target);
                }
            }
        }
    }
}
