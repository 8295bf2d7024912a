use crate::logic::board::{Board, Square};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

#[cfg(test)]
mod mate_test;

/// A move between two squares. Promotion is implicit: a pawn reaching the last row becomes a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Ordering score, only meaningful after `MoveGenerator::order_moves`.
    pub score: i32,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to, score: 0 }
    }

    /// Same squares, ignoring the ordering score.
    pub fn same_squares(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub score: i32,
}

pub trait Evaluator {
    /// Static score of `board`. Positive favours white.
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        game_state: &GameState,
        depth: u8,
        excluded_moves: &[Move],
    ) -> Option<(Move, SearchStats)>;
}
