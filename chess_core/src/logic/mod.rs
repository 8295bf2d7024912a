pub mod board;
pub mod eval_constants;
pub mod game;
pub mod generator;
pub mod pieces;
pub mod rules;
pub mod zobrist;
