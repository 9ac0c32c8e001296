use serde::{Deserialize, Serialize};

use crate::game::{Board, Color, SIZE};

/// Search value, always from the root color's perspective.
pub type Value = i32;

/// Stand-ins for -inf / +inf in the alpha-beta window.
pub const NEG_INF: Value = Value::MIN;
pub const POS_INF: Value = Value::MAX;

/// Disk differential: `color`'s disks minus the opponent's.
pub fn compute_utility(board: &Board, color: Color) -> Value {
    let (dark, light) = board.score();
    let diff = dark as Value - light as Value;
    match color {
        Color::Dark => diff,
        Color::Light => -diff,
    }
}

/// Non-terminal positional knowledge. Neutral by default.
pub fn compute_heuristic(_board: &Board, _color: Color) -> Value {
    0
}

/// Trait for scoring a board from one color's perspective.
pub trait Evaluator {
    /// Exact score of a position, also used to order moves.
    fn utility(&self, board: &Board, color: Color) -> Value;

    fn heuristic(&self, _board: &Board, _color: Color) -> Value {
        0
    }

    /// Score returned at depth-limit leaves.
    fn cutoff(&self, board: &Board, color: Color) -> Value {
        self.utility(board, color) + self.heuristic(board, color)
    }
}

/// Raw disk count with a neutral heuristic.
pub struct DiskDifferential;

impl Evaluator for DiskDifferential {
    fn utility(&self, board: &Board, color: Color) -> Value {
        compute_utility(board, color)
    }

    fn heuristic(&self, board: &Board, color: Color) -> Value {
        compute_heuristic(board, color)
    }
}

// Corners high, X/C squares next to them negative.
const SQUARE_WEIGHTS: [[Value; SIZE]; SIZE] = [
    [20, -3, 11, 8, 8, 11, -3, 20],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [20, -3, 11, 8, 8, 11, -3, 20],
];

/// Disk differential plus a static square-weight table at cutoff leaves.
///
/// Utility (and therefore move ordering) is still the raw disk count; only
/// the `heuristic` term differs from [`DiskDifferential`].
pub struct WeightedSquares;

impl Evaluator for WeightedSquares {
    fn utility(&self, board: &Board, color: Color) -> Value {
        compute_utility(board, color)
    }

    fn heuristic(&self, board: &Board, color: Color) -> Value {
        let own = color.to_cell();
        let opp = color.other().to_cell();
        let mut total = 0;
        for row in 0..SIZE {
            for col in 0..SIZE {
                let cell = board.get(row, col);
                if cell == own {
                    total += SQUARE_WEIGHTS[row][col];
                } else if cell == opp {
                    total -= SQUARE_WEIGHTS[row][col];
                }
            }
        }
        total
    }
}

/// Evaluator selection for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluatorKind {
    #[default]
    DiskDifferential,
    WeightedSquares,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::DiskDifferential => Box::new(DiskDifferential),
            EvaluatorKind::WeightedSquares => Box::new(WeightedSquares),
        }
    }
}
