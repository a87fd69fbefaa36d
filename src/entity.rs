use crate::grid::TerrainLookup;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    position: Position,
    on_goal: bool,
}

/// A movable object, i.e. the worker or a crate.
///
/// Every entity records one placement per turn, including turns in which it did not move, so
/// all histories have the same length and undoing a turn pops exactly one entry everywhere. The
/// initial placement is never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    history: Vec<Placement>,
}

impl Entity {
    pub(crate) fn new<T: TerrainLookup>(position: Position, terrain: &T) -> Self {
        Entity {
            history: vec![Placement {
                position,
                on_goal: terrain.terrain(position).is_goal(),
            }],
        }
    }

    fn current(&self) -> Placement {
        // `history` always contains the initial placement
        self.history[self.history.len() - 1]
    }

    /// Where the entity is right now.
    pub fn position(&self) -> Position {
        self.current().position
    }

    /// Where the entity was one turn ago, if a turn has been played.
    pub fn previous_position(&self) -> Option<Position> {
        let n = self.history.len();
        if n < 2 {
            None
        } else {
            Some(self.history[n - 2].position)
        }
    }

    /// Did the entity change its position in the most recent turn?
    pub fn has_moved(&self) -> bool {
        self.previous_position()
            .map_or(false, |prev| prev != self.position())
    }

    /// Is the entity standing on a goal? Computed when it arrived at its current position.
    pub fn is_on_goal(&self) -> bool {
        self.current().on_goal
    }

    /// Number of recorded placements, i.e. one more than the number of turns played.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn move_to<T: TerrainLookup>(&mut self, position: Position, terrain: &T) {
        self.history.push(Placement {
            position,
            on_goal: terrain.terrain(position).is_goal(),
        });
    }

    /// Record a turn in which the entity was not moved.
    pub(crate) fn stay(&mut self) {
        let current = self.current();
        self.history.push(current);
    }

    /// Forget the most recent turn. Return false if there was none.
    pub(crate) fn undo_move(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}
