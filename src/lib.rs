//! # Othello Search
//!
//! An Othello move-selection engine driven by depth-limited minimax or
//! alpha-beta search, with an optional transposition cache and node ordering.
//! The `othello-ai` binary plays one game against an external game manager
//! over stdin/stdout; `selfplay` runs local matches.
//!
//! ## Modules
//!
//! - [`game`]: Board representation, move rules, game state
//! - [`ai`]: Evaluators, minimax and alpha-beta search, cache, agents
//! - [`protocol`]: Line protocol spoken with the game manager
//! - [`arena`]: Local matches and match statistics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
