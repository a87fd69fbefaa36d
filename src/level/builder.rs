use std::convert::TryFrom;

use crate::cell::{Cell, Occupant};
use crate::grid::Grid;
use crate::position::Position;
use crate::util::SokobanError;

/// The result of scanning a level description: the grid plus the positions of everything that
/// can move, in scan order.
pub(crate) struct LevelBuilder {
    pub grid: Grid,
    pub worker_position: Position,
    pub crates: Vec<Position>,
}

impl LevelBuilder {
    pub fn new(level_string: &str) -> Result<Self, SokobanError> {
        let mut lines: Vec<_> = level_string.lines().collect();

        // Blank lines around the level are not part of it.
        while lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
        let lines = &lines[first..];

        let rows = lines.len();
        if rows == 0 {
            return Err(SokobanError::NoLevel);
        }
        let columns = lines[0].chars().count();

        let mut worker_position = None;
        let mut cells = Vec::with_capacity(rows * columns);
        let mut crates = Vec::with_capacity(20);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(SokobanError::UnequalRows {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, chr) in line.chars().enumerate() {
                let cell = Cell::try_from(chr).map_err(|_| SokobanError::InvalidCharacter {
                    character: chr,
                    row,
                    column,
                })?;
                let pos = Position::new(row, column);

                match cell.occupant() {
                    Occupant::Crate => crates.push(pos),
                    Occupant::Worker => {
                        if let Some(first) = worker_position {
                            return Err(SokobanError::TwoWorkers { first, second: pos });
                        }
                        worker_position = Some(pos);
                    }
                    Occupant::None => {}
                }
                cells.push(cell);
            }
        }

        let worker_position = worker_position.ok_or(SokobanError::NoWorker)?;
        debug!(
            "Scanned a {}x{} level with {} crates",
            rows,
            columns,
            crates.len()
        );

        Ok(Self {
            grid: Grid::new(rows, columns, cells),
            worker_position,
            crates,
        })
    }
}
