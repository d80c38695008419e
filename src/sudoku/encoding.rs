//! Building a complete formula for a puzzle.
//!
//! An [`EncodingPolicy`] is only a list of [`Part`]s; both policies go through
//! the same family functions. Clause order follows the list order, so output
//! is reproducible byte for byte.

use crate::sat::cnf::{Clause, Cnf};
use crate::sudoku::constraints::ConstraintFamily;
use crate::sudoku::grid::Grid;
use crate::sudoku::variable::NUM_VARS;
use clap::ValueEnum;
use std::fmt::Display;
use tracing::debug;

/// A contributor of clauses to a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// One rule family.
    Family(ConstraintFamily),
    /// Unit clauses for the puzzle's clues.
    Givens,
}

/// Which clause families make up the formula.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum EncodingPolicy {
    /// Cell-at-least-one, row/column/box-at-most-one and the givens.
    #[default]
    Minimal,
    /// Minimal plus cell-at-most-one and row/column/box-at-least-one.
    /// Same solutions, stronger unit propagation.
    Extended,
}

const MINIMAL: [Part; 5] = [
    Part::Family(ConstraintFamily::CellAtLeastOne),
    Part::Family(ConstraintFamily::RowAtMostOne),
    Part::Family(ConstraintFamily::ColAtMostOne),
    Part::Family(ConstraintFamily::BoxAtMostOne),
    Part::Givens,
];

const EXTENDED: [Part; 9] = [
    Part::Family(ConstraintFamily::CellAtLeastOne),
    Part::Family(ConstraintFamily::RowAtMostOne),
    Part::Family(ConstraintFamily::ColAtMostOne),
    Part::Family(ConstraintFamily::BoxAtMostOne),
    Part::Givens,
    Part::Family(ConstraintFamily::CellAtMostOne),
    Part::Family(ConstraintFamily::RowAtLeastOne),
    Part::Family(ConstraintFamily::ColAtLeastOne),
    Part::Family(ConstraintFamily::BoxAtLeastOne),
];

impl EncodingPolicy {
    /// The parts of this policy in emission order.
    #[must_use]
    pub const fn parts(self) -> &'static [Part] {
        match self {
            Self::Minimal => &MINIMAL,
            Self::Extended => &EXTENDED,
        }
    }

    /// Builds the formula for `grid`.
    #[must_use]
    pub fn encode(self, grid: &Grid) -> Cnf {
        let mut cnf = Cnf::new(NUM_VARS, Vec::with_capacity(self.clause_count(grid.given_count())));
        for part in self.parts() {
            match part {
                Part::Family(family) => cnf.extend(family.clauses()),
                Part::Givens => cnf.extend(givens(grid)),
            }
        }
        debug!(policy = %self, clauses = cnf.len(), "built formula");
        cnf
    }

    /// Clause count of [`EncodingPolicy::encode`] for a puzzle with `givens` clues.
    #[must_use]
    pub fn clause_count(self, givens: usize) -> usize {
        self.parts()
            .iter()
            .map(|part| match part {
                Part::Family(family) => family.clause_count(),
                Part::Givens => givens,
            })
            .sum()
    }
}

impl Display for EncodingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// One positive unit clause per filled cell, row-major.
#[must_use]
pub fn givens(grid: &Grid) -> Vec<Clause> {
    grid.givens().map(|v| Clause::unit(v.positive())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Valuation;
    use crate::sudoku::grid::{EXAMPLE_PUZZLE, EXAMPLE_SOLUTION};
    use crate::sudoku::variable::{SIZE, Variable};

    /// Every variable assigned: true for the digit in each cell, false otherwise.
    fn full_valuation(solution: &Grid) -> Valuation {
        let mut valuation = Valuation::new(NUM_VARS);
        for r in 1..=SIZE {
            for c in 1..=SIZE {
                for d in 1..=SIZE {
                    let var = Variable::new(r, c, d);
                    let value = usize::from(solution.get(r, c)) == d;
                    valuation.set(var.positive().unsigned_abs(), value);
                }
            }
        }
        valuation
    }

    #[test]
    fn test_clause_count_identities() {
        let grid = Grid::from(EXAMPLE_PUZZLE);
        let givens = grid.given_count();

        let minimal = EncodingPolicy::Minimal.encode(&grid);
        assert_eq!(minimal.len(), 81 + 2916 * 3 + givens);
        assert_eq!(minimal.len(), EncodingPolicy::Minimal.clause_count(givens));

        let extended = EncodingPolicy::Extended.encode(&grid);
        assert_eq!(extended.len(), minimal.len() + 2916 + 81 * 3);
        assert_eq!(extended.len(), EncodingPolicy::Extended.clause_count(givens));

        assert_eq!(minimal.num_vars, 729);
        assert_eq!(extended.num_vars, 729);
    }

    #[test]
    fn test_extended_starts_with_minimal() {
        let grid = Grid::from(EXAMPLE_PUZZLE);
        let minimal = EncodingPolicy::Minimal.encode(&grid);
        let extended = EncodingPolicy::Extended.encode(&grid);
        assert_eq!(&extended.clauses[..minimal.len()], &minimal.clauses[..]);
    }

    #[test]
    fn test_first_row_of_ones_is_still_encoded() {
        let text = format!("{}{}", "1".repeat(9), "0".repeat(72));
        let grid: Grid = text.parse().unwrap();
        let cnf = EncodingPolicy::Minimal.encode(&grid);

        let units: Vec<_> = cnf.iter().filter(|c| c.is_unit()).collect();
        assert_eq!(units.len(), 9);
        for (col, unit) in (1..=SIZE).zip(units) {
            assert_eq!(unit[0], Variable::new(1, col, 1).positive());
        }
        let cell_clauses = cnf.iter().filter(|c| c.len() == SIZE).count();
        assert_eq!(cell_clauses, 81);
        assert_eq!(cnf.len(), 81 + 2916 * 3 + 9);
    }

    #[test]
    fn test_empty_grid_has_no_givens() {
        let cnf = EncodingPolicy::Minimal.encode(&Grid::empty());
        assert_eq!(cnf.len(), 81 + 2916 * 3);
        assert!(cnf.iter().all(|c| !c.is_unit()));
    }

    #[test]
    fn test_known_solution_satisfies_both_policies() {
        let solution = Grid::from(EXAMPLE_SOLUTION);
        let valuation = full_valuation(&solution);

        for grid in [Grid::from(EXAMPLE_PUZZLE), solution, Grid::empty()] {
            for policy in [EncodingPolicy::Minimal, EncodingPolicy::Extended] {
                let cnf = policy.encode(&grid);
                assert_eq!(
                    cnf.first_unsatisfied(&valuation),
                    None,
                    "{policy} encoding rejected the known solution"
                );
            }
        }
    }

    #[test]
    fn test_wrong_solution_violates_formula() {
        let mut wrong = Grid::from(EXAMPLE_SOLUTION);
        wrong.set(1, 1, 3);
        let valuation = full_valuation(&wrong);
        let cnf = EncodingPolicy::Minimal.encode(&Grid::empty());
        assert!(!cnf.is_satisfied_by(&valuation));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let grid = Grid::from(EXAMPLE_PUZZLE);
        for policy in [EncodingPolicy::Minimal, EncodingPolicy::Extended] {
            assert_eq!(policy.encode(&grid).to_string(), policy.encode(&grid).to_string());
        }
    }

    #[test]
    fn test_policy_display_matches_value_names() {
        for p in EncodingPolicy::value_variants() {
            assert_eq!(p.to_possible_value().unwrap().get_name(), p.to_string());
        }
    }
}
