//! Move selection entry points shared by the minimax and alpha-beta searches.
//!
//! Both searches are written as a pair of mutually recursive node functions
//! (MAX for the root color, MIN for its opponent) that thread a [`Context`]
//! holding the evaluator, the optional cache and the visit counters.

use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::game::{Board, Color, Move};

use super::cache::{SearchResult, TranspositionCache};
use super::evaluator::{DiskDifferential, Evaluator, Value, NEG_INF, POS_INF};

/// How deep a search may go. `Unbounded` relies on running out of legal
/// moves to stop, which the 64-square board guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimit {
    Unbounded,
    Plies(u32),
}

impl DepthLimit {
    /// Game-manager encoding: any negative number means unbounded.
    pub fn from_protocol(limit: i32) -> Self {
        if limit < 0 {
            DepthLimit::Unbounded
        } else {
            DepthLimit::Plies(limit as u32)
        }
    }

    pub(crate) fn remaining(self) -> u32 {
        match self {
            DepthLimit::Unbounded => u32::MAX,
            DepthLimit::Plies(n) => n,
        }
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Unbounded => write!(f, "unbounded"),
            DepthLimit::Plies(n) => write!(f, "{n} plies"),
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// MAX and MIN nodes entered, the root included
    pub nodes: u64,
    /// Terminal and depth-limit leaves scored by the evaluator
    pub leaves: u64,
    pub cache_hits: u64,
    /// Nodes that returned early because the window closed
    pub prunes: u64,
    /// The subset of `prunes` taken at MIN nodes
    pub min_prunes: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.cache_hits += other.cache_hits;
        self.prunes += other.prunes;
        self.min_prunes += other.min_prunes;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub result: SearchResult,
    pub stats: SearchStats,
}

pub(crate) struct Context<'a> {
    pub root: Color,
    pub evaluator: &'a dyn Evaluator,
    pub cache: Option<&'a mut TranspositionCache>,
    pub ordering: bool,
    pub stats: SearchStats,
}

impl<'a> Context<'a> {
    fn new(
        root: Color,
        evaluator: &'a dyn Evaluator,
        cache: Option<&'a mut TranspositionCache>,
        ordering: bool,
    ) -> Self {
        Context {
            root,
            evaluator,
            cache,
            ordering,
            stats: SearchStats::default(),
        }
    }

    pub fn enter(&mut self) {
        self.stats.nodes += 1;
    }

    /// Cached result for `board`, if caching is on and the board was seen.
    pub fn probe(&mut self, board: &Board) -> Option<SearchResult> {
        let hit = self.cache.as_ref()?.lookup(board)?;
        self.stats.cache_hits += 1;
        Some(hit)
    }

    /// Remember the value of a child reached by `mv`.
    pub fn record(&mut self, child: Board, mv: Move, value: Value) {
        if let Some(cache) = self.cache.as_deref_mut() {
            cache.store(child, SearchResult::new(Some(mv), value));
        }
    }

    /// Side to move has no legal placement.
    pub fn terminal(&mut self, board: &Board) -> SearchResult {
        self.stats.leaves += 1;
        SearchResult::leaf(self.evaluator.utility(board, self.root))
    }

    /// Depth limit reached on a position that still has moves.
    pub fn cutoff(&mut self, board: &Board) -> SearchResult {
        self.stats.leaves += 1;
        SearchResult::leaf(self.evaluator.cutoff(board, self.root))
    }
}

/// Full minimax from `board` with `color` to move.
///
/// The root always expands its children: a cache entry records the move that
/// led *into* a board, so returning one at the root would hand back a move
/// for a different position.
pub fn minimax(
    board: &Board,
    color: Color,
    depth_limit: DepthLimit,
    evaluator: &dyn Evaluator,
    cache: Option<&mut TranspositionCache>,
) -> SearchReport {
    let mut ctx = Context::new(color, evaluator, cache, false);
    ctx.enter();
    let result = super::minimax::expand_max(&mut ctx, board, depth_limit.remaining());
    SearchReport {
        result,
        stats: ctx.stats,
    }
}

/// Alpha-beta from `board` with `color` to move, starting from a full window.
/// `ordering` sorts MAX-node children by static utility before expanding them.
pub fn alphabeta(
    board: &Board,
    color: Color,
    depth_limit: DepthLimit,
    evaluator: &dyn Evaluator,
    cache: Option<&mut TranspositionCache>,
    ordering: bool,
) -> SearchReport {
    let mut ctx = Context::new(color, evaluator, cache, ordering);
    ctx.enter();
    let result = super::alphabeta::expand_max(
        &mut ctx,
        board,
        NEG_INF,
        POS_INF,
        depth_limit.remaining(),
    );
    SearchReport {
        result,
        stats: ctx.stats,
    }
}

/// Pick a move for `color` with plain minimax and the disk-differential
/// evaluator. Passing a cache turns caching on. Returns `None` when `color`
/// has no legal move.
pub fn select_move_minimax(
    board: &Board,
    color: Color,
    depth_limit: DepthLimit,
    cache: Option<&mut TranspositionCache>,
) -> Option<Move> {
    minimax(board, color, depth_limit, &DiskDifferential, cache)
        .result
        .best_move
}

/// Pick a move for `color` with alpha-beta pruning and the disk-differential
/// evaluator. Returns `None` when `color` has no legal move.
pub fn select_move_alphabeta(
    board: &Board,
    color: Color,
    depth_limit: DepthLimit,
    cache: Option<&mut TranspositionCache>,
    ordering: bool,
) -> Option<Move> {
    alphabeta(board, color, depth_limit, &DiskDifferential, cache, ordering)
        .result
        .best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn depth_limit_protocol_encoding() {
        assert_eq!(DepthLimit::from_protocol(-1), DepthLimit::Unbounded);
        assert_eq!(DepthLimit::from_protocol(-7), DepthLimit::Unbounded);
        assert_eq!(DepthLimit::from_protocol(0), DepthLimit::Plies(0));
        assert_eq!(DepthLimit::from_protocol(5), DepthLimit::Plies(5));
    }

    #[test]
    fn depth_limit_display() {
        assert_eq!(DepthLimit::Unbounded.to_string(), "unbounded");
        assert_eq!(DepthLimit::Plies(3).to_string(), "3 plies");
    }

    #[test]
    fn stats_accumulate() {
        let mut total = SearchStats::default();
        total += SearchStats {
            nodes: 10,
            leaves: 6,
            cache_hits: 1,
            prunes: 2,
            min_prunes: 1,
        };
        total += SearchStats {
            nodes: 5,
            leaves: 3,
            cache_hits: 0,
            prunes: 1,
            min_prunes: 1,
        };
        assert_eq!(
            total,
            SearchStats {
                nodes: 15,
                leaves: 9,
                cache_hits: 1,
                prunes: 3,
                min_prunes: 2,
            }
        );
    }

    #[test]
    fn select_move_returns_legal_opening_move() {
        let board = Board::initial();
        let legal = board.legal_moves(Color::Dark);
        for depth in 1..=3 {
            let limit = DepthLimit::Plies(depth);
            let mm = select_move_minimax(&board, Color::Dark, limit, None).unwrap();
            let ab = select_move_alphabeta(&board, Color::Dark, limit, None, true).unwrap();
            assert!(legal.contains(&mm));
            assert!(legal.contains(&ab));
        }
    }

    #[test]
    fn select_move_none_without_legal_moves() {
        let board = Board::empty()
            .with_cell(0, 0, Cell::Dark)
            .with_cell(0, 1, Cell::Light);
        assert_eq!(
            select_move_minimax(&board, Color::Light, DepthLimit::Unbounded, None),
            None
        );
        let mut cache = TranspositionCache::new();
        assert_eq!(
            select_move_alphabeta(
                &board,
                Color::Light,
                DepthLimit::Plies(3),
                Some(&mut cache),
                true
            ),
            None
        );
    }

    #[test]
    fn root_never_short_circuits_on_cache() {
        // Poison the root entry; the root must still expand and pick a real move
        let board = Board::initial();
        let mut cache = TranspositionCache::new();
        cache.store(board, SearchResult::new(Some(Move::new(0, 0)), 99));

        let report = minimax(
            &board,
            Color::Dark,
            DepthLimit::Plies(1),
            &DiskDifferential,
            Some(&mut cache),
        );
        assert_eq!(report.result.best_move, Some(Move::new(2, 3)));
        assert_eq!(report.result.value, 3);
    }
}
