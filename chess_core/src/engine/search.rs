use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::game::{commit_move, EnPassant, GameState};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::is_in_check;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Bound wider than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Fixed-depth minimax with alpha-beta pruning. White maximizes, black minimizes.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    generator: MoveGenerator,
    nodes_searched: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            generator: MoveGenerator::new(),
            config,
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = SimpleEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited by the last root search.
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Scores `board` from white's point of view, looking `depth` plies ahead.
    ///
    /// A side with no legal move is charged the mate or stalemate score plus the remaining
    /// depth, so nearer mates weigh more.
    pub fn alpha_beta(
        &mut self,
        depth: u8,
        board: &Board,
        en_passant: Option<EnPassant>,
        white_to_move: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        let eval = self.evaluator.evaluate(board);
        if depth == 0 {
            return eval;
        }

        let turn = if white_to_move {
            Color::White
        } else {
            Color::Black
        };

        let mut moves = self.generator.all_legal_moves(board, turn, en_passant);
        if moves.is_empty() {
            let terminal = if is_in_check(board, turn) {
                self.config.mate_score
            } else {
                self.config.stalemate_score
            };
            return eval - turn.sign() * (terminal + i32::from(depth));
        }

        self.generator
            .order_moves(board, &mut moves, en_passant, &self.config);

        let mut best = if white_to_move { -INFINITY } else { INFINITY };
        for mv in &moves {
            let mut child = *board;
            let Ok(effects) = commit_move(&mut child, mv.from, mv.to, en_passant) else {
                continue;
            };
            let score = self.alpha_beta(
                depth - 1,
                &child,
                effects.en_passant,
                !white_to_move,
                alpha,
                beta,
            );

            if white_to_move {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Best move for `engine_color` and its score, or `None` without a legal move.
    /// A depth of 0 searches one ply.
    pub fn find_best_move(
        &mut self,
        depth: u8,
        board: &Board,
        en_passant: Option<EnPassant>,
        engine_color: Color,
    ) -> Option<(Move, i32)> {
        self.search_root(depth, board, en_passant, engine_color, &[])
    }

    fn search_root(
        &mut self,
        depth: u8,
        board: &Board,
        en_passant: Option<EnPassant>,
        engine_color: Color,
        excluded_moves: &[Move],
    ) -> Option<(Move, i32)> {
        self.nodes_searched = 0;
        let depth = depth.max(1);
        let maximizing = engine_color == Color::White;

        let mut moves = self
            .generator
            .all_legal_moves(board, engine_color, en_passant);
        if !excluded_moves.is_empty() {
            moves.retain(|m| !excluded_moves.iter().any(|ex| ex.same_squares(m)));
        }
        self.generator
            .order_moves(board, &mut moves, en_passant, &self.config);

        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for mv in &moves {
            let mut child = *board;
            let Ok(effects) = commit_move(&mut child, mv.from, mv.to, en_passant) else {
                continue;
            };
            let score = self.alpha_beta(
                depth - 1,
                &child,
                effects.en_passant,
                !maximizing,
                alpha,
                beta,
            );
            trace!("{} -> {}: {}", mv.from, mv.to, score);

            let improves = best.map_or(true, |(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });
            if improves {
                best = Some((*mv, score));
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        match best {
            Some((mv, score)) => debug!(
                "{:?} best move {} -> {} (score {}, depth {}, nodes {})",
                engine_color, mv.from, mv.to, score, depth, self.nodes_searched
            ),
            None => debug!("{engine_color:?} has no legal move"),
        }

        best
    }
}

impl Searcher for AlphaBetaEngine {
    /// A depth of 0 uses the configured default depth.
    fn search(
        &mut self,
        game_state: &GameState,
        depth: u8,
        excluded_moves: &[Move],
    ) -> Option<(Move, SearchStats)> {
        let status = game_state.status();
        if status.is_over() {
            warn!("search requested on a finished game: {status:?}");
            return None;
        }

        let depth = if depth == 0 {
            self.config.default_depth
        } else {
            depth
        };

        let (mv, score) = self.search_root(
            depth,
            &game_state.board,
            game_state.en_passant,
            game_state.turn,
            excluded_moves,
        )?;

        Some((
            mv,
            SearchStats {
                depth: depth.max(1),
                nodes: self.nodes_searched,
                score,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, PieceKind, Square};

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn engine() -> AlphaBetaEngine {
        AlphaBetaEngine::new(Arc::new(EngineConfig::default()))
    }

    /// Plain minimax with the same leaf and terminal scoring, no pruning.
    fn minimax(depth: u8, board: &Board, en_passant: Option<EnPassant>, white_to_move: bool) -> i32 {
        let config = EngineConfig::default();
        let eval = SimpleEvaluator::new(Arc::new(config.clone())).evaluate(board);
        if depth == 0 {
            return eval;
        }

        let turn = if white_to_move {
            Color::White
        } else {
            Color::Black
        };
        let moves = MoveGenerator::new().all_legal_moves(board, turn, en_passant);
        if moves.is_empty() {
            let terminal = if is_in_check(board, turn) {
                config.mate_score
            } else {
                config.stalemate_score
            };
            return eval - turn.sign() * (terminal + i32::from(depth));
        }

        let scores = moves.iter().map(|mv| {
            let mut child = *board;
            let effects = commit_move(&mut child, mv.from, mv.to, en_passant).unwrap();
            minimax(depth - 1, &child, effects.en_passant, !white_to_move)
        });
        if white_to_move {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let mut game = GameState::new();
        for (from, to) in [((6, 4), (4, 4)), ((1, 3), (3, 3))] {
            game.apply_move(sq(from.0, from.1), sq(to.0, to.1)).unwrap();
        }

        let mut back_rank = Board::empty();
        back_rank.place(sq(0, 6), Piece::new(PieceKind::King, Color::Black));
        for col in 5..8 {
            back_rank.place(sq(1, col), Piece::new(PieceKind::Pawn, Color::Black));
        }
        back_rank.place(sq(7, 0), Piece::new(PieceKind::Rook, Color::White));
        back_rank.place(sq(5, 2), Piece::new(PieceKind::Knight, Color::Black));
        back_rank.place(sq(7, 6), Piece::new(PieceKind::King, Color::White));

        let cases = [
            (game.board, game.en_passant, true, 3),
            (back_rank, None, true, 3),
            (back_rank, None, false, 2),
        ];

        let mut engine = engine();
        for (board, en_passant, white_to_move, depth) in cases {
            assert_eq!(
                engine.alpha_beta(depth, &board, en_passant, white_to_move, -INFINITY, INFINITY),
                minimax(depth, &board, en_passant, white_to_move),
                "depth {depth}, white to move: {white_to_move}"
            );
        }
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut engine = engine();
        let mut board = Board::new();
        board.clear_square(sq(0, 1));

        let expected = SimpleEvaluator::new(Arc::new(EngineConfig::default())).evaluate(&board);
        let score = engine.alpha_beta(0, &board, None, true, -INFINITY, INFINITY);
        assert_eq!(score, expected);
        assert_eq!(engine.nodes_searched(), 1);
    }

    #[test]
    fn test_takes_free_queen() {
        let mut board = Board::empty();
        board.place(sq(7, 4), Piece::new(PieceKind::King, Color::White));
        board.place(sq(3, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(sq(3, 7), Piece::new(PieceKind::Queen, Color::Black));
        board.place(sq(0, 4), Piece::new(PieceKind::King, Color::Black));

        let (mv, _) = engine()
            .find_best_move(1, &board, None, Color::White)
            .unwrap();
        assert_eq!((mv.from, mv.to), (sq(3, 0), sq(3, 7)));
    }

    #[test]
    fn test_black_minimizes() {
        let mut board = Board::empty();
        board.place(sq(7, 4), Piece::new(PieceKind::King, Color::White));
        board.place(sq(4, 7), Piece::new(PieceKind::Queen, Color::White));
        board.place(sq(4, 0), Piece::new(PieceKind::Rook, Color::Black));
        board.place(sq(0, 4), Piece::new(PieceKind::King, Color::Black));

        let (mv, score) = engine()
            .find_best_move(1, &board, None, Color::Black)
            .unwrap();
        assert_eq!((mv.from, mv.to), (sq(4, 0), sq(4, 7)));
        assert!(score < 0);
    }

    #[test]
    fn test_stalemated_side_is_charged() {
        let mut board = Board::empty();
        board.place(sq(0, 0), Piece::new(PieceKind::King, Color::Black));
        board.place(sq(2, 1), Piece::new(PieceKind::Queen, Color::White));
        board.place(sq(7, 7), Piece::new(PieceKind::King, Color::White));

        let config = EngineConfig::default();
        let mut engine = engine();
        let eval = SimpleEvaluator::new(Arc::new(EngineConfig::default())).evaluate(&board);
        let score = engine.alpha_beta(1, &board, None, false, -INFINITY, INFINITY);
        assert_eq!(score, eval + config.stalemate_score + 1);
        assert_eq!(engine.find_best_move(3, &board, None, Color::Black), None);
    }
}
