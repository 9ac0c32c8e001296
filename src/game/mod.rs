//! Othello rules engine: board representation, colors, and a game state
//! machine with immutable transitions and forced passes.

mod board;
mod color;
mod state;

pub use board::{Board, BoardError, Cell, Move, MoveError, CELLS, SIZE};
pub use color::Color;
pub use state::{GameOutcome, GameState};
