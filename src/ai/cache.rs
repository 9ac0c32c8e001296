use std::collections::HashMap;

use crate::game::{Board, Move};

use super::evaluator::Value;

/// Outcome of searching one node: the chosen move (absent at leaves) and its
/// value from the root color's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub value: Value,
}

impl SearchResult {
    pub fn new(best_move: Option<Move>, value: Value) -> Self {
        SearchResult { best_move, value }
    }

    pub fn leaf(value: Value) -> Self {
        SearchResult {
            best_move: None,
            value,
        }
    }
}

/// Board-keyed memo of previously searched positions.
///
/// Entries are keyed by the board alone, not by side to move, remaining
/// depth or node type, so a board reached from different contexts shares a
/// single entry. No eviction; the owner decides when to `clear`.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<Board, SearchResult>,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, board: &Board) -> Option<SearchResult> {
        self.entries.get(board).copied()
    }

    /// Insert or overwrite the entry for `board`.
    pub fn store(&mut self, board: Board, result: SearchResult) {
        self.entries.insert(board, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
