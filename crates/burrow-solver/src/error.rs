//! Error types for the burrow solver.
//!
//! Unsolvable burrows are not errors: they are reported through
//! [`crate::solver::Outcome`].

use thiserror::Error;

use crate::burrow::{Amphipod, ROOM_COUNT};
use crate::moves::Move;

/// The diagram does not describe a valid burrow.
///
/// Line and column numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 4 lines (walls, hallway, one room row), found {found}")]
    TooFewLines { found: usize },

    #[error("line {line}: {detail}")]
    MalformedRow { line: usize, detail: String },

    #[error("unrecognized character '{character}' at line {line} col {column}")]
    UnrecognizedCharacter {
        character: char,
        line: usize,
        column: usize,
    },

    #[error("amphipod parked above a room at line {line} col {column}")]
    TokenAtRoomMouth { line: usize, column: usize },

    #[error("amphipod above an empty room slot at line {line} col {column}")]
    FloatingToken { line: usize, column: usize },

    #[error("expected {expected} amphipods of type {amphipod}, found {found}")]
    Inventory {
        amphipod: Amphipod,
        expected: usize,
        found: usize,
    },
}

/// Internal consistency failure detected during search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("move {step:?} changed the amphipod inventory from {before:?} to {after:?}")]
    InventoryChanged {
        step: Move,
        before: [usize; ROOM_COUNT],
        after: [usize; ROOM_COUNT],
    },
}

/// Top-level error for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid diagram: {0}")]
    Parse(#[from] ParseError),

    #[error("search failed: {0}")]
    Solve(#[from] SolveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("must provide either a file path or --stdin")]
    MissingInput,
}

pub type Result<T> = std::result::Result<T, Error>;
