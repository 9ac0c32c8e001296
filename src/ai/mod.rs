//! Adversarial search: evaluators, the transposition cache, minimax and
//! alpha-beta searches, and the agents built on top of them.

mod agent;
mod alphabeta;
pub mod cache;
mod engine;
pub mod evaluator;
mod minimax;
mod random;
pub mod search;

pub use agent::Agent;
pub use cache::{SearchResult, TranspositionCache};
pub use engine::{Algorithm, CachePolicy, SearchAgent, SearchConfig};
pub use evaluator::{
    compute_heuristic, compute_utility, DiskDifferential, Evaluator, EvaluatorKind, Value,
    WeightedSquares,
};
pub use random::RandomAgent;
pub use search::{
    alphabeta, minimax, select_move_alphabeta, select_move_minimax, DepthLimit, SearchReport,
    SearchStats,
};
