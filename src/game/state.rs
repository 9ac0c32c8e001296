use super::{Board, Color, Move, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Color),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_move: Color,
    outcome: Option<GameOutcome>,
}

fn decide(board: &Board) -> GameOutcome {
    let (dark, light) = board.score();
    if dark > light {
        GameOutcome::Winner(Color::Dark)
    } else if light > dark {
        GameOutcome::Winner(Color::Light)
    } else {
        GameOutcome::Draw
    }
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState::from_board(Board::initial(), Color::Dark) // Dark starts
    }

    /// Wrap an arbitrary position. If `to_move` cannot move the turn passes;
    /// if neither side can move the game is already over.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        if board.has_legal_move(to_move) {
            GameState {
                board,
                to_move,
                outcome: None,
            }
        } else if board.has_legal_move(to_move.other()) {
            GameState {
                board,
                to_move: to_move.other(),
                outcome: None,
            }
        } else {
            GameState {
                board,
                to_move,
                outcome: Some(decide(&board)),
            }
        }
    }

    /// Get the color whose turn it is
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Legal placements for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves(self.to_move)
    }

    /// Apply a move and return new state (immutable). Handles forced passes.
    pub fn apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let board = self.board.apply_move(self.to_move, mv)?;
        Ok(GameState::from_board(board, self.to_move.other()))
    }
}
