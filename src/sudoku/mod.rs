#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as propositional logic: the variable mapping, the rule families,
//! the encoding policies and the decoder for solver assignments.

/// Puzzle files holding many grids.
pub mod collection;
/// The clause family for each Sudoku rule.
pub mod constraints;
/// Solver assignment to grid.
pub mod decode;
/// Encoding policies and the givens injector.
pub mod encoding;
/// The 9x9 grid and puzzle text parsing.
pub mod grid;
/// The (row, column, digit) to variable bijection.
pub mod variable;
