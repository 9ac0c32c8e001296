use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    /// Get the opposing color
    pub fn other(self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    /// Convert color to the cell its disks occupy
    pub fn to_cell(self) -> Cell {
        match self {
            Color::Dark => Cell::Dark,
            Color::Light => Cell::Light,
        }
    }

    /// Get color name for display
    pub fn name(self) -> &'static str {
        match self {
            Color::Dark => "Dark",
            Color::Light => "Light",
        }
    }

    /// Numeric code used by the game manager (1 = dark, moves first; 2 = light)
    pub fn code(self) -> u8 {
        match self {
            Color::Dark => 1,
            Color::Light => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Color> {
        match code {
            1 => Some(Color::Dark),
            2 => Some(Color::Light),
            _ => None,
        }
    }
}
