use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, Color, GameState, Move};

use super::agent::Agent;
use super::cache::TranspositionCache;
use super::evaluator::{Evaluator, EvaluatorKind};
use super::search::{alphabeta, minimax, DepthLimit, SearchReport, SearchStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// Lifetime of the transposition cache across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Keep entries for the whole session
    #[default]
    Persist,
    /// Start every move with an empty cache
    PerTurn,
}

/// Search settings, loadable from the `[search]` TOML section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Plies to search; -1 searches to the end of the game
    pub depth_limit: i32,
    pub caching: bool,
    /// Sort MAX-node children by static utility (alpha-beta only)
    pub ordering: bool,
    pub cache_policy: CachePolicy,
    pub evaluator: EvaluatorKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            depth_limit: 4,
            caching: false,
            ordering: false,
            cache_policy: CachePolicy::Persist,
            evaluator: EvaluatorKind::DiskDifferential,
        }
    }
}

impl SearchConfig {
    pub fn depth(&self) -> DepthLimit {
        DepthLimit::from_protocol(self.depth_limit)
    }
}

/// Search-driven agent. Owns the evaluator and the transposition caches, so
/// cached entries live exactly as long as the agent (subject to `cache_policy`).
///
/// Cached values are scored for the color that ran the search, so each root
/// color gets its own cache.
pub struct SearchAgent {
    config: SearchConfig,
    evaluator: Box<dyn Evaluator>,
    dark_cache: TranspositionCache,
    light_cache: TranspositionCache,
    last_report: Option<SearchReport>,
    totals: SearchStats,
    name: String,
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        let evaluator = config.evaluator.build();
        Self::with_evaluator(config, evaluator)
    }

    pub fn with_evaluator(config: SearchConfig, evaluator: Box<dyn Evaluator>) -> Self {
        let name = format!("{} ({})", config.algorithm, config.depth());
        SearchAgent {
            config,
            evaluator,
            dark_cache: TranspositionCache::new(),
            light_cache: TranspositionCache::new(),
            last_report: None,
            totals: SearchStats::default(),
            name,
        }
    }

    /// Run the configured search for `color` on `board`.
    pub fn search(&mut self, board: &Board, color: Color) -> SearchReport {
        let cache = match color {
            Color::Dark => &mut self.dark_cache,
            Color::Light => &mut self.light_cache,
        };
        if self.config.cache_policy == CachePolicy::PerTurn {
            cache.clear();
        }

        let depth = self.config.depth();
        let cache = if self.config.caching { Some(cache) } else { None };
        let report = match self.config.algorithm {
            Algorithm::Minimax => minimax(board, color, depth, self.evaluator.as_ref(), cache),
            Algorithm::AlphaBeta => alphabeta(
                board,
                color,
                depth,
                self.evaluator.as_ref(),
                cache,
                self.config.ordering,
            ),
        };

        log::debug!(
            "{} for {}: move={:?} value={} nodes={} leaves={} hits={} prunes={} cached={}",
            self.config.algorithm,
            color.name(),
            report.result.best_move,
            report.result.value,
            report.stats.nodes,
            report.stats.leaves,
            report.stats.cache_hits,
            report.stats.prunes,
            self.cache(color).len(),
        );

        self.totals += report.stats;
        self.last_report = Some(report);
        report
    }

    /// Move chosen for `color`, or `None` if it has no legal placement.
    pub fn select(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.search(board, color).result.best_move
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Stats summed over every search this agent has run
    pub fn total_stats(&self) -> SearchStats {
        self.totals
    }

    /// Cache used when searching for `color`
    pub fn cache(&self, color: Color) -> &TranspositionCache {
        match color {
            Color::Dark => &self.dark_cache,
            Color::Light => &self.light_cache,
        }
    }
}

impl Agent for SearchAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        if state.is_terminal() {
            return None;
        }
        self.select(state.board(), state.to_move())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
