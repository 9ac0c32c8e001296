use crate::game::{GameState, Move};

/// Universal interface for all move-selecting players.
pub trait Agent {
    /// Select a move for the side to move. `None` means the side has no
    /// legal placement.
    fn select_move(&mut self, state: &GameState) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
