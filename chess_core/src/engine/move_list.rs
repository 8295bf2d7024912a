use crate::engine::Move;
use crate::logic::board::Square;
use std::ops::Index;

// No legal chess position has more than 218 moves.
const MAX_MOVES: usize = 256;

static NULL_MOVE: Move = Move::new(Square::new_unchecked(0, 0), Square::new_unchecked(0, 0));

/// Fixed-capacity move buffer, avoiding a heap allocation per search node.
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        self.moves.get(..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Move> {
        self.moves
            .get_mut(..self.count)
            .unwrap_or(&mut [])
            .iter_mut()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m.same_squares(mv))
    }

    /// Stable sort, so ties keep generation order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Move, &Move) -> std::cmp::Ordering,
    {
        if let Some(slice) = self.moves.get_mut(..self.count) {
            slice.sort_by(compare);
        }
    }

    /// Keeps the moves matching `f`, preserving their order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut kept = 0;
        for i in 0..self.count {
            let Some(&mv) = self.moves.get(i) else {
                break;
            };
            if f(&mv) {
                if let Some(slot) = self.moves.get_mut(kept) {
                    *slot = mv;
                }
                kept += 1;
            }
        }
        self.count = kept;
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        // Out of range yields a null move instead of panicking.
        self.as_slice().get(index).unwrap_or(&NULL_MOVE)
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: usize, to: usize) -> Move {
        Move::new(Square::from_index(from), Square::from_index(to))
    }

    #[test]
    fn test_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(mv(52, 36));
        list.push(mv(62, 45));

        assert_eq!(list.len(), 2);
        assert_eq!(list[1], mv(62, 45));
        assert_eq!(list.iter().count(), 2);
        assert_eq!(list.into_iter().last(), Some(mv(62, 45)));
    }

    #[test]
    fn test_retain_keeps_order() {
        let mut list = MoveList::new();
        for to in 0..6 {
            list.push(mv(63, to));
        }
        list.retain(|m| m.to.index() % 2 == 0);

        let targets: Vec<usize> = list.iter().map(|m| m.to.index()).collect();
        assert_eq!(targets, vec![0, 2, 4]);
    }

    #[test]
    fn test_contains_ignores_score() {
        let mut list = MoveList::new();
        let mut scored = mv(52, 36);
        scored.score = 42;
        list.push(scored);

        assert!(list.contains(&mv(52, 36)));
        assert!(!list.contains(&mv(52, 44)));
    }
}
