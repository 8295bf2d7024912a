use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::Searcher;
use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::game::{GameState, GameStatus};
use std::sync::Arc;

fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

/// Back-rank mate: black king boxed in by its own pawns, white rook on the a-file.
fn back_rank_position() -> Board {
    let mut board = Board::empty();
    board.place(sq(0, 6), Piece::new(PieceKind::King, Color::Black));
    for col in 5..8 {
        board.place(sq(1, col), Piece::new(PieceKind::Pawn, Color::Black));
    }
    board.place(sq(7, 0), Piece::new(PieceKind::Rook, Color::White));
    board.place(sq(7, 6), Piece::new(PieceKind::King, Color::White));
    board
}

#[test]
fn test_finds_back_rank_mate() {
    let board = back_rank_position();
    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));

    let (mv, score) = engine
        .find_best_move(2, &board, None, Color::White)
        .unwrap();
    assert_eq!((mv.from, mv.to), (sq(7, 0), sq(0, 0)));
    assert!(score > EngineConfig::default().mate_score / 2);

    let mut game = GameState::from_board(board, Color::White);
    assert_eq!(
        game.apply_move(mv.from, mv.to),
        Ok(GameStatus::Checkmate(Color::White))
    );
}

#[test]
fn test_searcher_reports_stats() {
    let game = GameState::from_board(back_rank_position(), Color::White);
    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));

    let (mv, stats) = engine.search(&game, 2, &[]).unwrap();
    assert_eq!((mv.from, mv.to), (sq(7, 0), sq(0, 0)));
    assert_eq!(stats.depth, 2);
    assert!(stats.nodes > 1);
    assert_eq!(stats.nodes, engine.nodes_searched());
}

#[test]
fn test_engine_excludes_moves() {
    let config = Arc::new(EngineConfig::default());
    let mut engine = AlphaBetaEngine::new(config);
    let game = GameState::new();

    let (best_move, _) = engine.search(&game, 2, &[]).unwrap();

    let excluded = vec![best_move];
    let (next_best, _) = engine.search(&game, 2, &excluded).unwrap();

    assert!(
        !best_move.same_squares(&next_best),
        "excluded move {best_move:?} was returned again"
    );
}

#[test]
fn test_no_search_on_finished_game() {
    let mut game = GameState::new();
    for (from, to) in [((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))] {
        game.apply_move(sq(from.0, from.1), sq(to.0, to.1)).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Checkmate(Color::Black));

    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
    assert!(engine.search(&game, 2, &[]).is_none());
}
