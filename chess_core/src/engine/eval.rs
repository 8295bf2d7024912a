use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::Board;
use std::sync::Arc;

/// Material from the config plus piece-square bonuses.
pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .occupied()
            .map(|(square, piece)| {
                let value = self.config.piece_value(piece.kind) + piece.position_score(square);
                piece.color.sign() * value
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Color, Piece, PieceKind, Square};

    fn evaluator() -> SimpleEvaluator {
        SimpleEvaluator::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(evaluator().evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_material_advantage() {
        let mut board = Board::new();
        board.clear_square(Square::new(0, 3).unwrap()); // Black queen
        assert!(evaluator().evaluate(&board) > 0);

        let mut board = Board::new();
        board.clear_square(Square::new(7, 0).unwrap()); // White rook
        assert!(evaluator().evaluate(&board) < 0);
    }

    #[test]
    fn test_mirrored_pieces_cancel() {
        let mut board = Board::empty();
        board.place(
            Square::new(5, 2).unwrap(),
            Piece::new(PieceKind::Knight, Color::White),
        );
        board.place(
            Square::new(2, 2).unwrap(),
            Piece::new(PieceKind::Knight, Color::Black),
        );
        assert_eq!(evaluator().evaluate(&board), 0);
    }

    #[test]
    fn test_uses_configured_values() {
        let config = EngineConfig {
            val_pawn: 500,
            ..EngineConfig::default()
        };
        let mut board = Board::empty();
        let square = Square::new(4, 4).unwrap();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        board.place(square, pawn);

        let score = SimpleEvaluator::new(Arc::new(config)).evaluate(&board);
        assert_eq!(score, 500 + pawn.position_score(square));
    }
}
