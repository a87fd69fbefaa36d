//! A serializable summary of a level being played, for drivers that report progress.

use crate::level::Level;
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub rows: usize,
    pub columns: usize,
    pub worker_position: Position,
    pub crate_positions: Vec<Position>,
    pub crates_on_goal: usize,
    pub number_of_moves: usize,
    pub number_of_pushes: usize,

    /// Directions only, see `Level::move_log`.
    pub move_log: String,

    /// LURD notation, see `Level::moves_to_string`.
    pub moves: String,

    pub solved: bool,

    /// The current grid in the textual level format.
    pub grid: String,
}

impl<'a> From<&'a Level> for LevelState {
    fn from(level: &'a Level) -> Self {
        let (rows, columns) = level.dimensions();
        LevelState {
            rows,
            columns,
            worker_position: level.worker_position(),
            crate_positions: level.crate_positions(),
            crates_on_goal: level.crates_on_goal(),
            number_of_moves: level.number_of_moves(),
            number_of_pushes: level.number_of_pushes(),
            move_log: level.move_log(),
            moves: level.moves_to_string(),
            solved: level.is_solved(),
            grid: level.to_string(),
        }
    }
}

impl Level {
    pub fn snapshot(&self) -> LevelState {
        self.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_round_trip() {
        let mut lvl = Level::parse("#####\n#@$.#\n#####").unwrap();
        assert!(lvl.move_right());

        let state = lvl.snapshot();
        assert!(state.solved);
        assert_eq!(state.moves, "R");
        assert_eq!(state.grid, "#####\n# @*#\n#####\n");

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"worker_position\":{\"row\":1,\"column\":2}"));
        let parsed: LevelState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
