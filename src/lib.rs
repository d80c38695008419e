#![deny(missing_docs)]
//! This crate translates 9x9 Sudoku puzzles to SAT and back: a puzzle becomes
//! a DIMACS CNF formula over 729 variables, and an external solver's
//! satisfying assignment becomes a solved grid.

/// Error types for both pipeline stages.
pub mod error;

/// Whole-input reads and single-shot writes.
pub mod io;

/// The `sat` module holds the solver-agnostic pieces: clauses, formulas,
/// DIMACS, valuations and solver output parsing.
pub mod sat;

/// The `sudoku` module maps grids to formulas and assignments back to grids.
pub mod sudoku;

pub use error::{Error, Result};
pub use sat::solver_output::Strictness;
pub use sudoku::encoding::EncodingPolicy;
pub use sudoku::grid::Grid;
