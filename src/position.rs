use std::fmt;

use crate::direction::Direction;

/// A position in a Sokoban level given as (row, column) coordinates.
/// Positions are ordered row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: isize,
    pub column: isize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position {
            row: row as isize,
            column: column as isize,
        }
    }

    pub fn from_index(index: usize, columns: usize) -> Self {
        Position::new(index / columns, index % columns)
    }

    /// Row-major index. Only meaningful for positions inside a grid with `columns` columns.
    pub fn to_index(self, columns: usize) -> usize {
        self.column as usize + self.row as usize * columns
    }

    /// Return the neighbouring Position in the given direction.
    pub fn neighbour(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Position {
            row: self.row + dr,
            column: self.column + dc,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
