//! A Sokoban engine: load a level, move the worker around pushing crates, undo and redo moves,
//! and find out whether the level has been solved.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod cell;
mod direction;
mod entity;
mod grid;
mod level;
mod move_;
mod position;
mod state;
mod undo;
mod util;

pub use crate::cell::*;
pub use crate::direction::*;
pub use crate::entity::*;
pub use crate::grid::*;
pub use crate::level::*;
pub use crate::move_::*;
pub use crate::position::*;
pub use crate::state::*;
pub use crate::undo::*;
pub use crate::util::*;
