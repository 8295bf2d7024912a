use crate::logic::board::{Board, Color, Square};
use crate::logic::game::{commit_move, EnPassant};
use crate::logic::generator::MoveGenerator;
use crate::logic::pieces::{is_castling_move, CastleSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square is outside the board")]
    InvalidSquare,
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("piece does not belong to the side to move")]
    NotPlayersTurn,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("the game is already over")]
    GameAlreadyOver,
}

/// Checks a move for the side to move: bounds, then ownership, then full legality.
pub fn is_valid_move(
    board: &Board,
    from: Square,
    to: Square,
    turn: Color,
    en_passant: Option<EnPassant>,
) -> Result<(), MoveError> {
    if !from.is_on_board() || !to.is_on_board() {
        return Err(MoveError::InvalidSquare);
    }

    let piece = board.get(from).ok_or(MoveError::NoPieceAtSource)?;

    if piece.color != turn {
        return Err(MoveError::NotPlayersTurn);
    }

    if !is_legal_move(board, from, to, en_passant) {
        return Err(MoveError::IllegalMove);
    }

    Ok(())
}

/// Whether `square` is attacked by the opponent of `color`.
pub fn is_square_attacked(board: &Board, color: Color, square: Square) -> bool {
    board
        .pieces(color.opposite())
        .any(|(from, piece)| piece.attacks(from, square, board))
}

/// Checks if `color`'s king is attacked. A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, color, king))
}

/// Legal destinations for the piece on `from`; empty when the square is empty.
pub fn legal_moves(board: &Board, from: Square, en_passant: Option<EnPassant>) -> Vec<Square> {
    if !from.is_on_board() {
        return Vec::new();
    }
    MoveGenerator::new()
        .pseudo_legal_moves(board, from, en_passant)
        .into_iter()
        .filter(|&to| keeps_king_safe(board, from, to, en_passant))
        .collect()
}

pub fn is_legal_move(
    board: &Board,
    from: Square,
    to: Square,
    en_passant: Option<EnPassant>,
) -> bool {
    from.is_on_board()
        && MoveGenerator::new()
            .pseudo_legal_moves(board, from, en_passant)
            .contains(&to)
        && keeps_king_safe(board, from, to, en_passant)
}

/// Simulates a pseudo-legal move on a copy and rejects it if the mover ends up in check.
/// Castling is also rejected out of, through or into check, judged on the board before the move.
pub(crate) fn keeps_king_safe(
    board: &Board,
    from: Square,
    to: Square,
    en_passant: Option<EnPassant>,
) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };

    if is_castling_move(&piece, from, to) && !castling_is_safe(board, piece.color, to) {
        return false;
    }

    let mut next_board = *board;
    if commit_move(&mut next_board, from, to, en_passant).is_err() {
        return false;
    }

    !is_in_check(&next_board, piece.color)
}

fn castling_is_safe(board: &Board, color: Color, to: Square) -> bool {
    let Some(side) = CastleSide::from_king_target(to.col) else {
        return false;
    };
    let pass = Square::new_unchecked(to.row, side.king_pass_col());

    !is_in_check(board, color)
        && !is_square_attacked(board, color, pass)
        && !is_square_attacked(board, color, to)
}
