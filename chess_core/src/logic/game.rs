use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::generator::MoveGenerator;
use crate::logic::pieces::{is_castling_move, CastleSide};
use crate::logic::rules::{self, is_in_check, is_valid_move, MoveError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Half-moves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_LIMIT: u32 = 100;
/// Occurrences of one position that end the game.
pub const REPETITION_LIMIT: usize = 3;

/// Square a pawn skipped with a double step, and the color that skipped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnPassant {
    pub target: Square,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate(Color), // Winner
    Stalemate,
    InsufficientMaterial,
    Repetition,
    FiftyMoveRule,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// What a committed move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_pawn_move: bool,
    /// Window opened by a pawn double step.
    pub en_passant: Option<EnPassant>,
    pub castled: bool,
    pub promoted: bool,
}

impl MoveEffects {
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Applies a move to `board` only. No game bookkeeping happens here, so search and legality
/// probes run it on copies. Handles the en-passant capture, the castling rook, queen
/// promotion and the moved flag. An empty source is rejected and leaves the board untouched.
pub fn commit_move(
    board: &mut Board,
    from: Square,
    to: Square,
    en_passant: Option<EnPassant>,
) -> Result<MoveEffects, MoveError> {
    let original = board.get(from).ok_or(MoveError::NoPieceAtSource)?;
    let mut piece = original;
    piece.mark_moved();

    let mut captured = board.get(to);
    let mut effects = MoveEffects {
        piece: original,
        captured: None,
        is_pawn_move: false,
        en_passant: None,
        castled: false,
        promoted: false,
    };

    if piece.kind == PieceKind::Pawn {
        effects.is_pawn_move = true;

        // The passed pawn sits beside the mover, not on the target square.
        let takes_en_passant = captured.is_none()
            && from.col != to.col
            && en_passant.is_some_and(|ep| ep.target == to && ep.color != piece.color);
        if takes_en_passant {
            captured = board.clear_square(Square::new_unchecked(from.row, to.col));
        }

        if from.row.abs_diff(to.row) == 2 {
            effects.en_passant = Some(EnPassant {
                target: Square::new_unchecked((from.row + to.row) / 2, from.col),
                color: piece.color,
            });
        }

        if to.row == piece.color.promotion_row() {
            piece = Piece {
                kind: PieceKind::Queen,
                color: piece.color,
                has_moved: true,
            };
            effects.promoted = true;
        }
    }

    if is_castling_move(&piece, from, to) {
        if let Some(side) = CastleSide::from_king_target(to.col) {
            let rook_from = Square::new_unchecked(from.row, side.rook_col());
            if let Some(mut rook) = board.clear_square(rook_from) {
                rook.mark_moved();
                board.place(Square::new_unchecked(from.row, side.rook_target_col()), rook);
                effects.castled = true;
            }
        }
    }

    board.clear_square(from);
    board.place(to, piece);
    effects.captured = captured;

    Ok(effects)
}

/// Ignoring kings, neither side has more than one knight or bishop, and nothing heavier.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = [0u8; 2];
    for (_, piece) in board.occupied() {
        match piece.kind {
            PieceKind::King => {}
            kind if kind.is_minor() => {
                if let Some(count) = minors.get_mut(piece.color.index()) {
                    *count += 1;
                }
            }
            _ => return false,
        }
    }
    minors.iter().all(|&count| count <= 1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub color: Color,
    pub hash: u64,
    board_before: Board,
    en_passant_before: Option<EnPassant>,
    halfmove_clock_before: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub en_passant: Option<EnPassant>,
    pub halfmove_clock: u32,
    /// Hash of every position reached, starting with the initial one.
    pub position_history: Vec<u64>,
    pub last_move: Option<(Square, Square)>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, white to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// A game starting from an arbitrary placement.
    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            position_history: vec![board.position_hash(turn, None)],
            board,
            turn,
            en_passant: None,
            halfmove_clock: 0,
            last_move: None,
            history: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset to the starting position");
    }

    pub fn current_hash(&self) -> u64 {
        self.board.position_hash(self.turn, self.en_passant)
    }

    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        rules::legal_moves(&self.board, from, self.en_passant)
    }

    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        rules::is_legal_move(&self.board, from, to, self.en_passant)
    }

    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.board, self.turn)
    }

    /// Commits a real move. On error nothing changes.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<GameStatus, MoveError> {
        if self.status().is_over() {
            return Err(MoveError::GameAlreadyOver);
        }

        is_valid_move(&self.board, from, to, self.turn, self.en_passant)?;

        let mover = self.turn;
        let board_before = self.board;
        let en_passant_before = self.en_passant;
        let halfmove_clock_before = self.halfmove_clock;

        let mut next_board = self.board;
        let effects = commit_move(&mut next_board, from, to, self.en_passant)?;

        self.board = next_board;
        self.halfmove_clock = if effects.is_pawn_move || effects.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        // A window lasts exactly one reply: the next move either uses it or replaces it.
        self.en_passant = effects.en_passant;
        self.turn = mover.opposite();

        let hash = self.current_hash();
        self.position_history.push(hash);
        self.history.push(MoveRecord {
            from,
            to,
            piece: effects.piece,
            captured: effects.captured,
            color: mover,
            hash,
            board_before,
            en_passant_before,
            halfmove_clock_before,
        });
        self.last_move = Some((from, to));

        let status = self.status();
        debug!(
            "{:?} {:?} {} -> {} (captured: {:?}, castled: {}, promoted: {}) => {:?}",
            mover,
            effects.piece.kind,
            from,
            to,
            effects.captured.map(|p| p.kind),
            effects.castled,
            effects.promoted,
            status
        );

        Ok(status)
    }

    /// Takes back the last move. Returns `false` when there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };

        self.board = record.board_before;
        self.turn = record.color;
        self.en_passant = record.en_passant_before;
        self.halfmove_clock = record.halfmove_clock_before;
        self.position_history.pop();
        self.last_move = self.history.last().map(|prev| (prev.from, prev.to));

        debug!("undid {} -> {}", record.from, record.to);
        true
    }

    /// Status of the position for the side to move.
    pub fn status(&self) -> GameStatus {
        let generator = MoveGenerator::new();

        if !generator.has_legal_moves(&self.board, self.turn, self.en_passant) {
            if self.is_in_check() {
                return GameStatus::Checkmate(self.turn.opposite());
            }
            return GameStatus::Stalemate;
        }

        if self.halfmove_clock >= FIFTY_MOVE_LIMIT {
            return GameStatus::FiftyMoveRule;
        }

        if is_insufficient_material(&self.board) {
            return GameStatus::InsufficientMaterial;
        }

        let hash = self.current_hash();
        let occurrences = self.position_history.iter().filter(|&&h| h == hash).count();
        if occurrences >= REPETITION_LIMIT {
            return GameStatus::Repetition;
        }

        GameStatus::InProgress
    }
}
