use std::fmt;

use crate::cell::*;
use crate::position::Position;

/// Anything that knows the static layout of a level. Entities use this to find out whether they
/// are standing on a goal without holding on to the level itself.
pub trait TerrainLookup {
    fn terrain(&self, pos: Position) -> Terrain;
}

/// A fixed-size rectangular table of cells. The dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,

    /// `rows * columns` cells in row-major order
    cells: Vec<Cell>,
}

impl Grid {
    /// Callers guarantee that `cells.len() == rows * columns`.
    pub(crate) fn new(rows: usize, columns: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Grid {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.column >= 0
            && pos.row < self.rows as isize
            && pos.column < self.columns as isize
    }

    fn index(&self, pos: Position) -> usize {
        pos.to_index(self.columns)
    }

    /// The cell at `pos`, or `None` if `pos` lies outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// The cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds. Check against `dimensions()` first.
    pub fn cell(&self, pos: Position) -> Cell {
        assert!(self.in_bounds(pos), "{} is outside the grid", pos);
        self.cells[self.index(pos)]
    }

    /// The integer encoding of the cell at `pos`, see `Cell::value`.
    pub fn cell_value(&self, pos: Position) -> u8 {
        self.cell(pos).value()
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, Cell::is_walkable)
    }

    pub fn is_crate(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, Cell::is_crate)
    }

    pub fn is_worker(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, Cell::is_worker)
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, Cell::is_goal)
    }

    /// Replace whatever stands on the cell at `pos`.
    pub(crate) fn set_occupant(&mut self, pos: Position, occupant: Occupant) {
        let i = self.index(pos);
        self.cells[i] = self.cells[i].with_occupant(occupant);
    }

    pub(crate) fn set_cell(&mut self, pos: Position, cell: Cell) {
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.as_ref()
    }
}

impl TerrainLookup for Grid {
    fn terrain(&self, pos: Position) -> Terrain {
        self.cell(pos).terrain()
    }
}

/// One row per line, each terminated by a newline.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1)) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
