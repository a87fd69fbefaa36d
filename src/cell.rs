use std::convert::TryFrom;

/// Static part of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Floor,
    Wall,
    Goal,
}

impl Terrain {
    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }

    pub fn is_goal(self) -> bool {
        self == Terrain::Goal
    }

    fn value(self) -> u8 {
        match self {
            Terrain::Floor => FLOOR_VALUE,
            Terrain::Wall => WALL_VALUE,
            Terrain::Goal => GOAL_VALUE,
        }
    }
}

/// Dynamic part of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    None,
    Crate,
    Worker,
}

impl Occupant {
    fn value(self) -> u8 {
        match self {
            Occupant::None => 0,
            Occupant::Crate => CRATE_VALUE,
            Occupant::Worker => WORKER_VALUE,
        }
    }
}

// Values of the additive integer encoding used by external tools. A cell's value is the sum of
// its terrain and occupant values.
const FLOOR_VALUE: u8 = 0;
const WALL_VALUE: u8 = 1;
const GOAL_VALUE: u8 = 2;
const CRATE_VALUE: u8 = 3;
const WORKER_VALUE: u8 = 4;

/// The contents of a single grid position. Nothing can stand on a wall, so there is no way to
/// construct such a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    terrain: Terrain,
    occupant: Occupant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid character {0:?}")]
pub struct TryFromCellError(pub char);

impl Cell {
    pub const FLOOR: Cell = Cell {
        terrain: Terrain::Floor,
        occupant: Occupant::None,
    };

    pub const WALL: Cell = Cell {
        terrain: Terrain::Wall,
        occupant: Occupant::None,
    };

    pub const GOAL: Cell = Cell {
        terrain: Terrain::Goal,
        occupant: Occupant::None,
    };

    /// Combine terrain and occupant, or return `None` if something would stand on a wall.
    pub fn new(terrain: Terrain, occupant: Occupant) -> Option<Self> {
        if terrain.is_wall() && occupant != Occupant::None {
            None
        } else {
            Some(Cell { terrain, occupant })
        }
    }

    pub fn terrain(self) -> Terrain {
        self.terrain
    }

    pub fn occupant(self) -> Occupant {
        self.occupant
    }

    /// The same terrain with a different occupant. Walls stay empty.
    pub(crate) fn with_occupant(self, occupant: Occupant) -> Self {
        debug_assert!(!self.terrain.is_wall() || occupant == Occupant::None);
        Cell {
            terrain: self.terrain,
            occupant,
        }
    }

    /// Can the worker step onto this cell, or a crate be pushed onto it?
    pub fn is_walkable(self) -> bool {
        !self.terrain.is_wall() && self.occupant == Occupant::None
    }

    pub fn is_crate(self) -> bool {
        self.occupant == Occupant::Crate
    }

    pub fn is_worker(self) -> bool {
        self.occupant == Occupant::Worker
    }

    pub fn is_goal(self) -> bool {
        self.terrain.is_goal()
    }

    pub fn is_wall(self) -> bool {
        self.terrain.is_wall()
    }

    /// The integer encoding of this cell: floor 0, wall 1, goal 2, crate 3, worker 4, where the
    /// terrain and occupant values are added up. The result is always in `0..=6`.
    pub fn value(self) -> u8 {
        self.terrain.value() + self.occupant.value()
    }

    /// Inverse of `value`.
    pub fn from_value(value: u8) -> Option<Self> {
        let (terrain, occupant) = match value {
            0 => (Terrain::Floor, Occupant::None),
            1 => (Terrain::Wall, Occupant::None),
            2 => (Terrain::Goal, Occupant::None),
            3 => (Terrain::Floor, Occupant::Crate),
            4 => (Terrain::Floor, Occupant::Worker),
            5 => (Terrain::Goal, Occupant::Crate),
            6 => (Terrain::Goal, Occupant::Worker),
            _ => return None,
        };
        Cell::new(terrain, occupant)
    }

    /// Given a Cell, return the character representing it in the on-disc format.
    pub fn to_char(self) -> char {
        use self::Occupant::*;
        use self::Terrain::*;
        match (self.terrain, self.occupant) {
            (Floor, None) => ' ',
            (Wall, _) => '#',
            (Goal, None) => '.',
            (Floor, Crate) => '$',
            (Floor, Worker) => '@',
            (Goal, Crate) => '*',
            (Goal, Worker) => '+',
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = TryFromCellError;

    /// Try to parse a given character as part of a level description.
    fn try_from(c: char) -> Result<Cell, TryFromCellError> {
        use self::Occupant::*;
        use self::Terrain::*;
        let (terrain, occupant) = match c {
            ' ' => (Floor, None),
            '#' => (Wall, None),
            '.' => (Goal, None),
            '$' => (Floor, Crate),
            '@' => (Floor, Worker),
            '*' => (Goal, Crate),
            '+' => (Goal, Worker),
            _ => return Err(TryFromCellError(c)),
        };
        Ok(Cell { terrain, occupant })
    }
}
