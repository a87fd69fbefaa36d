pub(crate) mod builder;
mod solver;

use std::convert::TryFrom;
use std::fmt;

use crate::cell::{Cell, Occupant};
use crate::direction::Direction;
use crate::entity::Entity;
use crate::grid::Grid;
use crate::level::builder::LevelBuilder;
use crate::move_::*;
use crate::position::Position;
use crate::undo::Undo;
use crate::util::{ReplayError, SokobanError};

/// A level being played: the grid, the worker, the crates and the moves made so far.
///
/// All mutation goes through `try_move`, `undo`, `redo` and `reset`, which keeps the grid, the
/// entities' histories and the move log consistent with each other.
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,

    worker: Entity,

    /// The id of a crate is its index in this vector.
    crates: Vec<Entity>,

    /// The moves performed so far, plus the ones that have been undone and can be redone.
    moves: Undo<Move>,
}

enum MoveEvaluation {
    Walk,
    Push { crate_to: Position },
    Blocked { at: Position, obstacle: Obstacle },
}

/// Loading and queries. None of these change an existing `Level`.
impl Level {
    /// Parse the ASCII representation of a level.
    pub fn parse(level_string: &str) -> Result<Self, SokobanError> {
        let LevelBuilder {
            grid,
            worker_position,
            crates,
        } = LevelBuilder::new(level_string)?;

        let worker = Entity::new(worker_position, &grid);
        let crates = crates
            .into_iter()
            .map(|pos| Entity::new(pos, &grid))
            .collect();

        Ok(Level {
            grid,
            worker,
            crates,
            moves: Undo::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// The cell at `pos`. Panics if `pos` is not within `dimensions()`.
    pub fn cell(&self, pos: Position) -> Cell {
        self.grid.cell(pos)
    }

    /// The integer encoding of the cell at `pos`. Panics if `pos` is not within `dimensions()`.
    pub fn cell_value(&self, pos: Position) -> u8 {
        self.grid.cell_value(pos)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.grid.is_walkable(pos)
    }

    pub fn is_crate(&self, pos: Position) -> bool {
        self.grid.is_crate(pos)
    }

    pub fn is_worker(&self, pos: Position) -> bool {
        self.grid.is_worker(pos)
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.grid.is_goal(pos)
    }

    pub fn worker(&self) -> &Entity {
        &self.worker
    }

    pub fn worker_position(&self) -> Position {
        self.worker.position()
    }

    pub fn crates(&self) -> &[Entity] {
        self.crates.as_ref()
    }

    /// The crates' positions, ordered by id.
    pub fn crate_positions(&self) -> Vec<Position> {
        self.crates.iter().map(Entity::position).collect()
    }

    pub fn number_of_crates(&self) -> usize {
        self.crates.len()
    }

    pub fn crates_on_goal(&self) -> usize {
        self.crates.iter().filter(|c| c.is_on_goal()).count()
    }

    /// Is every crate on a goal? A level without crates is trivially solved.
    pub fn is_solved(&self) -> bool {
        self.crates_on_goal() == self.number_of_crates()
    }

    /// How many moves were performed to reach the current state?
    pub fn number_of_moves(&self) -> usize {
        self.moves.len()
    }

    /// How many times have crates been moved to reach the current state?
    pub fn number_of_pushes(&self) -> usize {
        self.moves
            .performed()
            .iter()
            .filter(|mv| mv.moves_crate())
            .count()
    }

    /// The directions of the moves made so far as a string over `UDLR`.
    pub fn move_log(&self) -> String {
        self.moves
            .performed()
            .iter()
            .map(|mv| mv.direction.to_char())
            .collect()
    }

    /// The moves made so far in LURD notation, i.e. pushes in upper case.
    pub fn moves_to_string(&self) -> String {
        self.moves.performed().iter().map(Move::to_char).collect()
    }

    /// Can the worker move one step in the given direction, pushing a crate if necessary?
    pub fn can_move(&self, direction: Direction) -> bool {
        !matches!(
            self.evaluate_move(direction),
            MoveEvaluation::Blocked { .. }
        )
    }

    fn obstacle(&self, pos: Position) -> Obstacle {
        match self.grid.get(pos) {
            None => Obstacle::OutOfBounds,
            Some(cell) if cell.is_wall() => Obstacle::Wall,
            Some(_) => Obstacle::Crate,
        }
    }

    /// Figure out whether a move can be performed in the current state, and if not, what is in
    /// the way.
    fn evaluate_move(&self, direction: Direction) -> MoveEvaluation {
        let target = self.worker_position().neighbour(direction);

        if self.grid.is_walkable(target) {
            trace!("Target cell {} is empty", target);
            MoveEvaluation::Walk
        } else if self.grid.is_crate(target) {
            let crate_to = target.neighbour(direction);
            if self.grid.is_walkable(crate_to) {
                trace!("Pushing crate from {} to {}", target, crate_to);
                MoveEvaluation::Push { crate_to }
            } else {
                MoveEvaluation::Blocked {
                    at: crate_to,
                    obstacle: self.obstacle(crate_to),
                }
            }
        } else {
            MoveEvaluation::Blocked {
                at: target,
                obstacle: self.obstacle(target),
            }
        }
    }
}

/// Movement, i.e. everything that *does* change `self`.
impl Level {
    /// Try to move one step in the given direction, pushing a crate if there is one. Return
    /// whether the worker moved. A blocked move changes nothing.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let crate_to = match self.evaluate_move(direction) {
            MoveEvaluation::Walk => None,
            MoveEvaluation::Push { crate_to } => Some(crate_to),
            MoveEvaluation::Blocked { at, obstacle } => {
                info!(
                    "Cannot move {:?}: there is a {:?} at {}",
                    direction, obstacle, at
                );
                return false;
            }
        };

        let r#move = self.perform_move(direction, crate_to);
        self.moves.record(r#move);
        true
    }

    pub fn move_up(&mut self) -> bool {
        self.try_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(Direction::Down)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(Direction::Right)
    }

    /// Execute a move already known to be legal.
    fn perform_move(&mut self, direction: Direction, crate_to: Option<Position>) -> Move {
        let from = self.worker_position();
        let to = from.neighbour(direction);

        let mut touched = vec![from, to];
        touched.extend(crate_to);
        let changes = touched
            .into_iter()
            .map(|position| CellChange {
                position,
                before: self.grid.cell(position),
            })
            .collect();

        let mut pushed_crate = None;
        for (id, c) in self.crates.iter_mut().enumerate() {
            match crate_to {
                Some(crate_to) if c.position() == to => {
                    self.grid.set_occupant(to, Occupant::None);
                    self.grid.set_occupant(crate_to, Occupant::Crate);
                    c.move_to(crate_to, &self.grid);
                    pushed_crate = Some(id);
                }
                _ => c.stay(),
            }
        }

        self.grid.set_occupant(from, Occupant::None);
        self.grid.set_occupant(to, Occupant::Worker);
        self.worker.move_to(to, &self.grid);

        debug!("Moved {:?} from {} to {}", direction, from, to);
        Move {
            direction,
            pushed_crate,
            changes,
        }
    }

    /// Undo the most recent move. Return false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let r#move = match self.moves.undo() {
            Some(r#move) => r#move,
            None => {
                warn!("Nothing to undo!");
                return false;
            }
        };

        for change in r#move.changes.iter().rev() {
            self.grid.set_cell(change.position, change.before);
        }
        let undone = self.worker.undo_move();
        debug_assert!(undone);
        for c in &mut self.crates {
            let undone = c.undo_move();
            debug_assert!(undone);
        }

        true
    }

    /// If a move has been undone previously, redo it.
    pub fn redo(&mut self) -> bool {
        let direction = match self.moves.next_redo() {
            Some(r#move) => r#move.direction,
            None => {
                warn!("Nothing to redo!");
                return false;
            }
        };

        // Redoing from the state the move was undone to cannot be blocked.
        let is_ok = self.try_move(direction);
        debug_assert!(is_ok);
        is_ok
    }

    /// Undo all moves and forget them.
    pub fn reset(&mut self) {
        while !self.moves.is_empty() {
            self.undo();
        }
        self.moves.discard_redo();
    }

    /// Execute a sequence of moves given as letters in either `UDLR` or LURD notation.
    /// Whitespace is ignored. The string is checked before anything is moved, but moves
    /// preceding a blocked one stay performed.
    pub fn replay(&mut self, moves: &str) -> Result<(), ReplayError> {
        let directions = moves
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(index, character)| {
                Direction::try_from(character)
                    .map(|dir| (index, character, dir))
                    .map_err(|_| ReplayError::InvalidMove { character, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, character, direction) in directions {
            if !self.try_move(direction) {
                return Err(ReplayError::Blocked { character, index });
            }
        }
        Ok(())
    }
}

/// The textual level format, one row per line.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::direction::DIRECTIONS;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for Direction {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&DIRECTIONS).unwrap()
        }
    }

    const CROWDED: &str = "#######\n\
                           #  .  #\n\
                           # $$  #\n\
                           #. @ .#\n\
                           #  $ *#\n\
                           #######";

    fn count_crate_cells(lvl: &Level) -> usize {
        lvl.grid().cells().iter().filter(|c| c.is_crate()).count()
    }

    #[test]
    fn test_trivial_move_1() {
        use self::Direction::*;

        let mut lvl = Level::parse(
            "####\n\
             #@ #\n\
             ####\n",
        )
        .unwrap();
        assert_eq!(lvl.worker_position(), Position::new(1, 1));

        assert!(lvl.is_walkable(Position::new(1, 2)));
        assert!(!lvl.is_walkable(Position::new(1, 0)));
        assert!(lvl.crate_positions().is_empty());

        assert!(lvl.try_move(Right));
        assert!(lvl.try_move(Left));
        assert!(!lvl.try_move(Left));
        assert!(!lvl.try_move(Up));
        assert!(!lvl.try_move(Down));
        assert_eq!(lvl.move_log(), "RL");
    }

    #[test]
    fn test_trivial_move_2() {
        use self::Direction::*;
        let mut lvl = Level::parse(
            "#######\n\
             #.$@$.#\n\
             #######\n",
        )
        .unwrap();
        assert_eq!(lvl.worker_position(), Position::new(1, 3));
        assert!(lvl.try_move(Right));
        assert!(lvl.try_move(Left));
        assert!(lvl.try_move(Left));
        assert!(!lvl.try_move(Up));
        assert!(!lvl.try_move(Down));
        assert!(lvl.is_solved());
        assert_eq!(lvl.moves_to_string(), "RlL");
        assert_eq!(lvl.number_of_pushes(), 2);

        assert!(lvl.undo());
        assert!(!lvl.is_solved());
        assert!(lvl.try_move(Right));
        assert!(!lvl.redo());
        assert!(lvl.try_move(Left));
        assert!(lvl.try_move(Left));
        assert!(lvl.is_solved());
    }

    #[test]
    fn crates_that_stay_record_a_turn() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        assert!(lvl.move_right());
        assert_eq!(lvl.worker().history_len(), 2);
        for c in lvl.crates() {
            assert_eq!(c.history_len(), 2);
            assert!(!c.has_moved());
        }
        assert!(lvl.worker().has_moved());
    }

    #[test]
    fn push_updates_goal_flag() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        assert_eq!(lvl.crates_on_goal(), 1);

        // The crate at (4, 5) starts on a goal, the one above the worker is pushed onto another.
        assert!(lvl.move_up());
        assert_eq!(lvl.crate_positions()[1], Position::new(1, 3));
        assert!(lvl.crates()[1].is_on_goal());
        assert_eq!(lvl.crates_on_goal(), 2);

        assert!(lvl.undo());
        assert_eq!(lvl.crates_on_goal(), 1);
        assert_eq!(lvl.crate_positions()[1], Position::new(2, 3));
    }

    #[test]
    fn crate_cannot_push_crate() {
        let mut lvl = Level::parse("######\n#@$$ #\n######").unwrap();
        assert!(!lvl.can_move(Direction::Right));
        assert!(!lvl.move_right());
        assert_eq!(lvl.number_of_moves(), 0);
    }

    #[test]
    fn unbordered_level_does_not_panic() {
        let mut lvl = Level::parse("@$").unwrap();
        assert!(!lvl.move_right());
        assert!(!lvl.move_left());
        assert!(!lvl.move_up());
        assert_eq!(lvl.to_string(), "@$\n");
    }

    #[test]
    fn redo_after_undo() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        let start = lvl.to_string();
        assert!(lvl.move_up());
        assert!(lvl.move_right());
        let after = lvl.to_string();
        assert!(lvl.undo());
        assert!(lvl.undo());
        assert_eq!(lvl.to_string(), start);
        assert!(lvl.redo());
        assert!(lvl.redo());
        assert!(!lvl.redo());
        assert_eq!(lvl.to_string(), after);
        assert_eq!(lvl.moves_to_string(), "Ur");
    }

    #[test]
    fn repeating_undone_move_keeps_redo() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        assert!(lvl.move_up());
        assert!(lvl.move_right());
        let after = lvl.to_string();
        assert!(lvl.undo());
        assert!(lvl.undo());

        assert!(lvl.move_up());
        assert!(lvl.redo());
        assert_eq!(lvl.to_string(), after);
        assert_eq!(lvl.moves_to_string(), "Ur");

        assert!(lvl.undo());
        assert!(lvl.move_down());
        assert!(!lvl.redo());
        assert_eq!(lvl.moves_to_string(), "Ud");
    }

    #[test]
    fn undo_rewinds_every_history() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        lvl.replay("Url").unwrap();
        assert_eq!(lvl.worker().history_len(), 4);
        assert!(lvl.crates().iter().all(|c| c.history_len() == 4));
        while lvl.undo() {}
        assert_eq!(lvl.worker().history_len(), 1);
        assert!(lvl.crates().iter().all(|c| c.history_len() == 1));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        let start = lvl.to_string();
        lvl.replay("Url").unwrap();
        lvl.reset();
        assert_eq!(lvl.to_string(), start);
        assert_eq!(lvl.move_log(), "");
        assert!(!lvl.redo());
        assert!(!lvl.undo());
    }

    #[test]
    fn replay_errors() {
        let mut lvl = Level::parse(CROWDED).unwrap();
        assert_eq!(
            lvl.replay("r x"),
            Err(ReplayError::InvalidMove {
                character: 'x',
                index: 2
            })
        );
        assert_eq!(lvl.number_of_moves(), 0);

        assert_eq!(
            lvl.replay("rr r"),
            Err(ReplayError::Blocked {
                character: 'r',
                index: 3
            })
        );
        assert_eq!(lvl.move_log(), "RR");
    }

    #[quickcheck]
    fn prop_move_undo(mut move_dirs: Vec<Direction>) -> bool {
        let mut lvl = Level::parse(CROWDED).unwrap();
        move_dirs.truncate(40);

        let start = lvl.to_string();
        let worker = lvl.worker_position();
        let crates = lvl.crate_positions();

        let mut performed = 0;
        for dir in move_dirs {
            let expected = lvl.can_move(dir);
            if lvl.try_move(dir) != expected {
                return false;
            }
            if expected {
                performed += 1;
            }
            if count_crate_cells(&lvl) != lvl.number_of_crates() {
                return false;
            }
        }
        for _ in 0..performed {
            if !lvl.undo() {
                return false;
            }
        }

        !lvl.undo()
            && lvl.to_string() == start
            && lvl.worker_position() == worker
            && lvl.crate_positions() == crates
            && lvl.move_log().is_empty()
            && lvl.worker().history_len() == 1
    }

    #[quickcheck]
    fn prop_one_step_per_move(move_dirs: Vec<Direction>) -> bool {
        let mut lvl = Level::parse(CROWDED).unwrap();
        for dir in move_dirs.into_iter().take(40) {
            let before = lvl.crate_positions();
            let on_goal = lvl.crates_on_goal();
            if !lvl.try_move(dir) {
                continue;
            }

            let moved: Vec<_> = lvl.crates().iter().filter(|c| c.has_moved()).collect();
            if !lvl.worker().has_moved() || moved.len() > 1 {
                return false;
            }
            if let Some(c) = moved.first() {
                let prev = c.previous_position();
                if prev.map(|p| p.neighbour(dir)) != Some(c.position()) {
                    return false;
                }
                let prev_on_goal = prev.map_or(false, |p| lvl.is_goal(p));
                let delta = lvl.crates_on_goal() as isize - on_goal as isize;
                let expected = c.is_on_goal() as isize - prev_on_goal as isize;
                if delta != expected {
                    return false;
                }
            } else if lvl.crate_positions() != before {
                return false;
            }
        }
        true
    }
}
