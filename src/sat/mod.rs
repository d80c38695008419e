#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
/// Per-variable truth values.
pub mod assignment;
/// Clauses and formulas.
pub mod cnf;
/// DIMACS CNF reading and writing.
pub mod dimacs;
/// Classifying and collecting solver output.
pub mod solver_output;
