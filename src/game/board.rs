use std::fmt;

use super::color::Color;

pub const SIZE: usize = 8;
pub const CELLS: usize = SIZE * SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// Game-manager cell code: 0 empty, 1 dark, 2 light
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Dark => 1,
            Cell::Light => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Dark),
            2 => Some(Cell::Light),
            _ => None,
        }
    }
}

/// A disk placement. Column first, matching the game manager's `"col row"` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub col: usize,
    pub row: usize,
}

impl Move {
    pub fn new(col: usize, row: usize) -> Self {
        Move { col, row }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.col, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    Occupied,
    NoFlips,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected {expected} cells, got {actual}")]
    WrongCellCount { expected: usize, actual: usize },

    #[error("invalid cell code {code} at index {index}")]
    InvalidCode { index: usize, code: u8 },
}

/// Immutable 8x8 position. Equality and hashing depend only on cell contents,
/// which is what makes a board usable as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

fn in_bounds(row: i32, col: i32) -> bool {
    row >= 0 && row < SIZE as i32 && col >= 0 && col < SIZE as i32
}

impl Board {
    /// Create a board with no disks
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Standard starting position: light on d4/e5, dark on e4/d5
    pub fn initial() -> Self {
        Board::empty()
            .with_cell(3, 3, Cell::Light)
            .with_cell(3, 4, Cell::Dark)
            .with_cell(4, 3, Cell::Dark)
            .with_cell(4, 4, Cell::Light)
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Return a copy of this board with one cell replaced
    pub fn with_cell(mut self, row: usize, col: usize, cell: Cell) -> Board {
        self.cells[row][col] = cell;
        self
    }

    /// Build a board from 64 row-major cell codes
    pub fn from_codes(codes: &[u8]) -> Result<Board, BoardError> {
        if codes.len() != CELLS {
            return Err(BoardError::WrongCellCount {
                expected: CELLS,
                actual: codes.len(),
            });
        }

        let mut board = Board::empty();
        for (index, &code) in codes.iter().enumerate() {
            let cell = Cell::from_code(code).ok_or(BoardError::InvalidCode { index, code })?;
            board.cells[index / SIZE][index % SIZE] = cell;
        }
        Ok(board)
    }

    /// Row-major cell codes, the inverse of `from_codes`
    pub fn to_codes(&self) -> [u8; CELLS] {
        let mut codes = [0u8; CELLS];
        for row in 0..SIZE {
            for col in 0..SIZE {
                codes[row * SIZE + col] = self.cells[row][col].code();
            }
        }
        codes
    }

    /// Number of opponent disks `color` would flip walking from (row, col)
    /// in direction (dr, dc). Zero unless the run is closed by an own disk.
    fn run_length(&self, color: Color, row: usize, col: usize, dr: i32, dc: i32) -> usize {
        let own = color.to_cell();
        let opp = color.other().to_cell();

        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut run = 0;

        while in_bounds(r, c) {
            match self.cells[r as usize][c as usize] {
                cell if cell == opp => {
                    run += 1;
                    r += dr;
                    c += dc;
                }
                cell if cell == own => return run,
                _ => return 0,
            }
        }

        0
    }

    /// Check whether `color` may place a disk at `mv`
    pub fn is_legal(&self, color: Color, mv: Move) -> bool {
        if mv.row >= SIZE || mv.col >= SIZE {
            return false;
        }
        if self.cells[mv.row][mv.col] != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.run_length(color, mv.row, mv.col, dr, dc) > 0)
    }

    /// All legal placements for `color`. Columns are scanned in the outer
    /// loop and rows in the inner loop; search tie-breaking relies on this
    /// order being stable.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for col in 0..SIZE {
            for row in 0..SIZE {
                let mv = Move::new(col, row);
                if self.is_legal(color, mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        (0..SIZE).any(|col| (0..SIZE).any(|row| self.is_legal(color, Move::new(col, row))))
    }

    /// Place a disk for `color` at `mv` and flip every bracketed line.
    /// The move is assumed legal (e.g. taken from `legal_moves`).
    pub fn play(&self, color: Color, mv: Move) -> Board {
        let own = color.to_cell();
        let mut next = *self;
        next.cells[mv.row][mv.col] = own;

        for (dr, dc) in DIRECTIONS {
            let run = self.run_length(color, mv.row, mv.col, dr, dc);
            for step in 1..=run as i32 {
                let r = (mv.row as i32 + dr * step) as usize;
                let c = (mv.col as i32 + dc * step) as usize;
                next.cells[r][c] = own;
            }
        }

        next
    }

    /// Checked version of `play`
    pub fn apply_move(&self, color: Color, mv: Move) -> Result<Board, MoveError> {
        if mv.row >= SIZE || mv.col >= SIZE {
            return Err(MoveError::OutOfBounds);
        }
        if self.cells[mv.row][mv.col] != Cell::Empty {
            return Err(MoveError::Occupied);
        }
        if !self.is_legal(color, mv) {
            return Err(MoveError::NoFlips);
        }
        Ok(self.play(color, mv))
    }

    /// Count disks of one color
    pub fn count(&self, color: Color) -> u32 {
        let cell = color.to_cell();
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count() as u32
    }

    /// Disk tallies as (dark, light)
    pub fn score(&self) -> (u32, u32) {
        (self.count(Color::Dark), self.count(Color::Light))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
