//! Minimum-energy solver for the amphipod burrow puzzle.
//!
//! Four types of amphipod (A, B, C, D) start scattered across a hallway
//! and four side rooms. The solver finds the least total energy needed to
//! move every amphipod into its own room, or reports that no sequence of
//! legal moves gets there.

pub mod burrow;
pub mod diagram;
pub mod error;
pub mod moves;
pub mod solver;

// Re-export main types
pub use burrow::{Amphipod, Burrow, Cell, Energy, Slot};
pub use error::{Error, ParseError, Result, SolveError};
pub use moves::{moves_from_room, moves_to_room, successors, Move, Successor};
pub use solver::{solve, Commit, Outcome, Search, SolverConfig, SolverResult};
