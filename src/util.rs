use std::io;

use crate::position::Position;

/// Everything that can go wrong while loading a level. A level that fails to load never yields
/// a partially built `Level`.
#[derive(Debug, thiserror::Error)]
pub enum SokobanError {
    #[error("{0}")]
    IoError(#[from] io::Error),

    #[error("The level description is empty")]
    NoLevel,

    #[error("Invalid character {character:?} in row {row}, column {column}")]
    InvalidCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("Row {row} has {found} columns, expected {expected}")]
    UnequalRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No worker found")]
    NoWorker,

    #[error("More than one worker found: {first} and {second}")]
    TwoWorkers { first: Position, second: Position },
}

/// Why a string of moves could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("Invalid move {character:?} at index {index}")]
    InvalidMove { character: char, index: usize },

    #[error("Move {index} ({character}) is blocked")]
    Blocked { character: char, index: usize },
}
