use crate::engine::config::EngineConfig;
use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Color, PieceKind, Square};
use crate::logic::game::{commit_move, EnPassant};
use crate::logic::rules::{is_in_check, keeps_king_safe};

pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Piece geometry from `from`, plus the en-passant capture for an eligible pawn.
    pub fn pseudo_legal_moves(
        &self,
        board: &Board,
        from: Square,
        en_passant: Option<EnPassant>,
    ) -> Vec<Square> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };

        let mut moves = piece.reachable_squares(from, board);
        if let Some(ep) = en_passant {
            if piece.can_capture_en_passant(from, en_passant) && !moves.contains(&ep.target) {
                moves.push(ep.target);
            }
        }
        moves
    }

    /// Every legal (source, destination) pair for `color`, in board order.
    pub fn all_legal_moves(
        &self,
        board: &Board,
        color: Color,
        en_passant: Option<EnPassant>,
    ) -> MoveList {
        let mut moves = MoveList::new();

        for (from, _) in board.pieces(color) {
            for to in self.pseudo_legal_moves(board, from, en_passant) {
                if keeps_king_safe(board, from, to, en_passant) {
                    moves.push(Move::new(from, to));
                }
            }
        }

        moves
    }

    /// Checks if `color` has at least one legal move.
    /// This is optimized to return `true` as soon as a valid move is found.
    pub fn has_legal_moves(
        &self,
        board: &Board,
        color: Color,
        en_passant: Option<EnPassant>,
    ) -> bool {
        board.pieces(color).any(|(from, _)| {
            self.pseudo_legal_moves(board, from, en_passant)
                .into_iter()
                .any(|to| keeps_king_safe(board, from, to, en_passant))
        })
    }

    /// Captures first (most valuable victim, then cheapest attacker), then checks, then quiet
    /// moves. The sort is stable, so equal scores keep generation order.
    pub fn order_moves(
        &self,
        board: &Board,
        moves: &mut MoveList,
        en_passant: Option<EnPassant>,
        config: &EngineConfig,
    ) {
        for mv in moves.iter_mut() {
            mv.score = Self::score_move(board, mv, en_passant, config);
        }
        moves.sort_by(|a, b| b.score.cmp(&a.score));
    }

    fn score_move(
        board: &Board,
        mv: &Move,
        en_passant: Option<EnPassant>,
        config: &EngineConfig,
    ) -> i32 {
        let Some(attacker) = board.get(mv.from) else {
            return 0;
        };

        let victim = board.get(mv.to).map(|p| p.kind).or_else(|| {
            let is_ep = attacker.kind == PieceKind::Pawn
                && en_passant.is_some_and(|ep| ep.target == mv.to && ep.color != attacker.color);
            is_ep.then_some(PieceKind::Pawn)
        });

        if let Some(victim) = victim {
            return config.score_capture_base + config.piece_value(victim) * 10
                - config.piece_value(attacker.kind);
        }

        let mut next_board = *board;
        if commit_move(&mut next_board, mv.from, mv.to, en_passant).is_ok()
            && is_in_check(&next_board, attacker.color.opposite())
        {
            return config.score_check;
        }

        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Piece;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let board = Board::new();
        let generator = MoveGenerator::new();
        assert_eq!(generator.all_legal_moves(&board, Color::White, None).len(), 20);
        assert_eq!(generator.all_legal_moves(&board, Color::Black, None).len(), 20);
        assert!(generator.has_legal_moves(&board, Color::White, None));
    }

    #[test]
    fn test_en_passant_is_injected() {
        let mut board = Board::empty();
        board.place(sq(3, 4), Piece::new(PieceKind::Pawn, Color::White));
        board.place(sq(3, 3), Piece::new(PieceKind::Pawn, Color::Black));
        let window = Some(EnPassant {
            target: sq(2, 3),
            color: Color::Black,
        });

        let generator = MoveGenerator::new();
        let moves = generator.pseudo_legal_moves(&board, sq(3, 4), window);
        assert!(moves.contains(&sq(2, 3)));
        assert!(moves.contains(&sq(2, 4)));
        assert!(!generator
            .pseudo_legal_moves(&board, sq(3, 4), None)
            .contains(&sq(2, 3)));
    }

    #[test]
    fn test_order_captures_then_checks_then_quiet() {
        let mut board = Board::empty();
        board.place(sq(7, 0), Piece::new(PieceKind::King, Color::White));
        board.place(sq(4, 4), Piece::new(PieceKind::Rook, Color::White));
        board.place(sq(4, 7), Piece::new(PieceKind::Knight, Color::Black));
        board.place(sq(0, 3), Piece::new(PieceKind::King, Color::Black));

        let generator = MoveGenerator::new();
        let config = EngineConfig::default();
        let mut moves = generator.all_legal_moves(&board, Color::White, None);
        generator.order_moves(&board, &mut moves, None, &config);

        let first = moves[0];
        assert_eq!((first.from, first.to), (sq(4, 4), sq(4, 7)));

        let second = moves[1];
        assert_eq!(second.from, sq(4, 4));
        assert_eq!(second.score, config.score_check);

        let mut seen_quiet = false;
        for mv in &moves {
            if mv.score == 0 {
                seen_quiet = true;
            } else {
                assert!(!seen_quiet, "non-quiet move {mv:?} after a quiet one");
            }
        }
    }

    #[test]
    fn test_mvv_lva_prefers_bigger_victim() {
        let mut board = Board::empty();
        board.place(sq(7, 7), Piece::new(PieceKind::King, Color::White));
        board.place(sq(4, 4), Piece::new(PieceKind::Pawn, Color::White));
        board.place(sq(3, 3), Piece::new(PieceKind::Knight, Color::Black));
        board.place(sq(3, 5), Piece::new(PieceKind::Queen, Color::Black));
        board.place(sq(0, 0), Piece::new(PieceKind::King, Color::Black));

        let generator = MoveGenerator::new();
        let mut moves = generator.all_legal_moves(&board, Color::White, None);
        generator.order_moves(&board, &mut moves, None, &EngineConfig::default());

        assert_eq!(moves[0].to, sq(3, 5));
        assert_eq!(moves[1].to, sq(3, 3));
    }
}
