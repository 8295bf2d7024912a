use crate::logic::eval_constants::get_pst_value;
use crate::logic::game::EnPassant;
use crate::logic::pieces::{has_castling_rights, CastleSide};
use crate::logic::rules::MoveError;
use crate::logic::zobrist::ZobristKeys;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const KING_HOME_COL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Evaluation sign: white adds, black subtracts.
    pub const fn sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Row delta of a pawn step. White starts on row 6 and walks towards row 0.
    pub const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    pub const fn home_row(self) -> usize {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Row a pawn of this color promotes on.
    pub const fn promotion_row(self) -> usize {
        self.opposite().home_row()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_minor(self) -> bool {
        matches!(self, Self::Knight | Self::Bishop)
    }

    const fn fen_char(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }
}

/// A piece on the board. Kind and color never change; `has_moved` flips once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Piece-square bonus for standing on `square`.
    pub fn position_score(&self, square: Square) -> i32 {
        get_pst_value(self.kind, self.color, square.row, square.col)
    }
}

/// Board coordinate. Row 0 is black's back rank, row 7 is white's; col 0 is the a-file.
/// Always on the board: outside the crate it is only built through the checked constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

#[derive(Deserialize)]
struct RawSquare {
    row: usize,
    col: usize,
}

impl TryFrom<RawSquare> for Square {
    type Error = MoveError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col)
    }
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Result<Self, MoveError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(MoveError::InvalidSquare)
        }
    }

    /// Caller guarantees `row` and `col` are below 8.
    pub(crate) const fn new_unchecked(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Caller guarantees `idx` is below 64.
    pub(crate) const fn from_index(idx: usize) -> Self {
        Self {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }

    pub const fn row(self) -> usize {
        self.row
    }

    pub const fn col(self) -> usize {
        self.col
    }

    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    pub const fn from_pair(pair: (usize, usize)) -> Result<Self, MoveError> {
        Self::new(pair.0, pair.1)
    }

    pub const fn to_pair(self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Parses the "row col" form used by the presentation layer, e.g. `"6 4"`.
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let mut parts = text.split_whitespace();
        let mut next = || -> Result<usize, MoveError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or(MoveError::InvalidSquare)
        };
        let row = next()?;
        let col = next()?;
        if parts.next().is_some() {
            return Err(MoveError::InvalidSquare);
        }
        Self::new(row, col)
    }

    /// Square shifted by the given deltas, or `None` off the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col).ok()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// 8x8 mailbox. `Copy`, so a clone never shares pieces with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; NUM_SQUARES],
        }
    }

    fn setup_initial_position(&mut self) {
        self.setup_pieces(Color::Black, 0, 1);
        self.setup_pieces(Color::White, 7, 6);
    }

    fn setup_pieces(&mut self, color: Color, back_row: usize, pawn_row: usize) {
        let pieces = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (col, &kind) in pieces.iter().enumerate() {
            self.place(Square::new_unchecked(back_row, col), Piece::new(kind, color));
            self.place(
                Square::new_unchecked(pawn_row, col),
                Piece::new(PieceKind::Pawn, color),
            );
        }
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.grid.get(square.index()).copied().flatten()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Puts `piece` on `square`, replacing whatever stood there.
    pub fn place(&mut self, square: Square, piece: Piece) {
        if let Some(slot) = self.grid.get_mut(square.index()) {
            *slot = Some(piece);
        }
    }

    /// Empties `square` and hands back its previous occupant.
    pub fn clear_square(&mut self, square: Square) -> Option<Piece> {
        self.grid.get_mut(square.index()).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.grid = [None; NUM_SQUARES];
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Every occupied square with its piece, row by row from row 0.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|piece| (Square::from_index(idx), piece)))
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Zobrist key of placement, side to move, castling rights and en-passant window.
    /// The window only counts while an enemy pawn stands ready to take through it.
    pub fn position_hash(&self, turn: Color, en_passant: Option<EnPassant>) -> u64 {
        let keys = ZobristKeys::get();
        let mut hash = 0;

        for (square, piece) in self.occupied() {
            hash ^= keys.get_piece_key(piece.kind, piece.color, square);
        }

        if turn == Color::Black {
            hash ^= keys.side_key;
        }

        for color in [Color::White, Color::Black] {
            for side in CastleSide::ALL {
                if has_castling_rights(self, color, side) {
                    hash ^= keys.get_castle_key(color, side);
                }
            }
        }

        if let Some(ep) = en_passant {
            let capturable = self
                .pieces(ep.color.opposite())
                .any(|(square, piece)| piece.can_capture_en_passant(square, en_passant));
            if capturable {
                hash ^= keys.get_en_passant_key(ep.target.col);
            }
        }

        hash
    }

    /// Placement and side to move in FEN layout, for logs and test fixtures.
    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::new();

        for row in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.get(Square::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let char_code = piece.kind.fen_char();
                    fen.push(if piece.color == Color::White {
                        char_code.to_ascii_uppercase()
                    } else {
                        char_code
                    });
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row + 1 < BOARD_SIZE {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Color::White { 'w' } else { 'b' });

        fen
    }
}
