use std::fmt;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::position::Position;

/// The contents of a cell before a move changed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub position: Position,
    pub before: Cell,
}

/// This structure contains everything needed to undo a Sokoban move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Where was the move directed?
    pub direction: Direction,

    /// The id of the crate pushed by this move, if any.
    pub pushed_crate: Option<usize>,

    /// Every cell changed by the move, in the order the changes were applied.
    pub changes: Vec<CellChange>,
}

impl Move {
    pub fn moves_crate(&self) -> bool {
        self.pushed_crate.is_some()
    }

    /// LURD notation: upper case for pushes, lower case otherwise.
    pub fn to_char(&self) -> char {
        let c = self.direction.to_char();
        if self.moves_crate() {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// What blocked a movement?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    Crate,
    OutOfBounds,
}
