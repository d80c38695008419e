//! The Sudoku rules as clause families.
//!
//! Each family is a pure function of the fixed 9x9 shape. Families share no
//! state, so an [`EncodingPolicy`](crate::sudoku::encoding::EncodingPolicy)
//! can combine any subset of them. Pairwise "at most one" families emit each
//! unordered pair once, smaller position first.

use crate::sat::cnf::Clause;
use crate::sudoku::grid::{box_cells, boxes};
use crate::sudoku::variable::{SIZE, Variable};
use itertools::Itertools;
use std::fmt::Display;

/// Pairwise clauses per 9-element scope: C(9, 2).
pub const PAIRS_PER_SCOPE: usize = SIZE * (SIZE - 1) / 2;

/// Clauses emitted by a pairwise family: 81 scopes of 36 pairs.
pub const AT_MOST_ONE_CLAUSES: usize = SIZE * SIZE * PAIRS_PER_SCOPE;

/// Clauses emitted by an "at least one" family: one per scope.
pub const AT_LEAST_ONE_CLAUSES: usize = SIZE * SIZE;

/// One Sudoku rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintFamily {
    /// Every cell holds at least one digit.
    CellAtLeastOne,
    /// Every cell holds at most one digit.
    CellAtMostOne,
    /// Each digit appears at most once per row.
    RowAtMostOne,
    /// Each digit appears at most once per column.
    ColAtMostOne,
    /// Each digit appears at most once per box.
    BoxAtMostOne,
    /// Each digit appears at least once per row.
    RowAtLeastOne,
    /// Each digit appears at least once per column.
    ColAtLeastOne,
    /// Each digit appears at least once per box.
    BoxAtLeastOne,
}

impl ConstraintFamily {
    /// Every family, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::CellAtLeastOne,
        Self::CellAtMostOne,
        Self::RowAtMostOne,
        Self::ColAtMostOne,
        Self::BoxAtMostOne,
        Self::RowAtLeastOne,
        Self::ColAtLeastOne,
        Self::BoxAtLeastOne,
    ];

    /// Builds the family's clauses.
    #[must_use]
    pub fn clauses(self) -> Vec<Clause> {
        match self {
            Self::CellAtLeastOne => cell_at_least_one(),
            Self::CellAtMostOne => cell_at_most_one(),
            Self::RowAtMostOne => row_at_most_one(),
            Self::ColAtMostOne => col_at_most_one(),
            Self::BoxAtMostOne => box_at_most_one(),
            Self::RowAtLeastOne => row_at_least_one(),
            Self::ColAtLeastOne => col_at_least_one(),
            Self::BoxAtLeastOne => box_at_least_one(),
        }
    }

    /// How many clauses [`ConstraintFamily::clauses`] returns.
    #[must_use]
    pub const fn clause_count(self) -> usize {
        match self {
            Self::CellAtMostOne | Self::RowAtMostOne | Self::ColAtMostOne | Self::BoxAtMostOne => {
                AT_MOST_ONE_CLAUSES
            }
            Self::CellAtLeastOne
            | Self::RowAtLeastOne
            | Self::ColAtLeastOne
            | Self::BoxAtLeastOne => AT_LEAST_ONE_CLAUSES,
        }
    }
}

impl Display for ConstraintFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CellAtLeastOne => "cell-at-least-one",
            Self::CellAtMostOne => "cell-at-most-one",
            Self::RowAtMostOne => "row-at-most-one",
            Self::ColAtMostOne => "col-at-most-one",
            Self::BoxAtMostOne => "box-at-most-one",
            Self::RowAtLeastOne => "row-at-least-one",
            Self::ColAtLeastOne => "col-at-least-one",
            Self::BoxAtLeastOne => "box-at-least-one",
        };
        write!(f, "{name}")
    }
}

fn digits() -> std::ops::RangeInclusive<usize> {
    1..=SIZE
}

/// `(¬a ∨ ¬b)` for every unordered pair of the given variables.
fn pairwise_exclusions<I>(vars: I) -> impl Iterator<Item = Clause>
where
    I: IntoIterator<Item = Variable>,
    I::IntoIter: Clone,
{
    vars.into_iter()
        .tuple_combinations()
        .map(|(a, b): (Variable, Variable)| Clause::from([a.negative(), b.negative()]))
}

/// `(a1 ∨ ... ∨ a9)` over the given variables.
fn disjunction(vars: impl IntoIterator<Item = Variable>) -> Clause {
    vars.into_iter().map(|v| v.positive()).collect()
}

/// For each cell (r, c): `s_rc1 ∨ ... ∨ s_rc9`.
#[must_use]
pub fn cell_at_least_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .map(|(r, c)| disjunction(digits().map(|d| Variable::new(r, c, d))))
        .collect()
}

/// For each cell (r, c) and digits d1 < d2: `¬s_rcd1 ∨ ¬s_rcd2`.
#[must_use]
pub fn cell_at_most_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .flat_map(|(r, c)| pairwise_exclusions(digits().map(move |d| Variable::new(r, c, d))))
        .collect()
}

/// For each row r, digit d and columns c1 < c2: `¬s_rc1d ∨ ¬s_rc2d`.
#[must_use]
pub fn row_at_most_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .flat_map(|(r, d)| pairwise_exclusions(digits().map(move |c| Variable::new(r, c, d))))
        .collect()
}

/// For each column c, digit d and rows r1 < r2: `¬s_r1cd ∨ ¬s_r2cd`.
#[must_use]
pub fn col_at_most_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .flat_map(|(c, d)| pairwise_exclusions(digits().map(move |r| Variable::new(r, c, d))))
        .collect()
}

/// For each box, digit d and pair of cells in the box: `¬s_r1c1d ∨ ¬s_r2c2d`.
#[must_use]
pub fn box_at_most_one() -> Vec<Clause> {
    boxes()
        .cartesian_product(digits())
        .flat_map(|((br, bc), d)| {
            pairwise_exclusions(
                box_cells(br, bc)
                    .into_iter()
                    .map(move |(r, c)| Variable::new(r, c, d)),
            )
        })
        .collect()
}

/// For each row r and digit d: `s_r1d ∨ ... ∨ s_r9d`.
#[must_use]
pub fn row_at_least_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .map(|(r, d)| disjunction(digits().map(|c| Variable::new(r, c, d))))
        .collect()
}

/// For each column c and digit d: `s_1cd ∨ ... ∨ s_9cd`.
#[must_use]
pub fn col_at_least_one() -> Vec<Clause> {
    digits()
        .cartesian_product(digits())
        .map(|(c, d)| disjunction(digits().map(|r| Variable::new(r, c, d))))
        .collect()
}

/// For each box and digit d: the disjunction of `s_rcd` over the box's cells.
#[must_use]
pub fn box_at_least_one() -> Vec<Clause> {
    boxes()
        .cartesian_product(digits())
        .map(|((br, bc), d)| {
            disjunction(
                box_cells(br, bc)
                    .into_iter()
                    .map(|(r, c)| Variable::new(r, c, d)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::variable::NUM_VARS;
    use std::collections::HashSet;

    #[test]
    fn test_family_counts() {
        for family in ConstraintFamily::ALL {
            assert_eq!(
                family.clauses().len(),
                family.clause_count(),
                "{family} count"
            );
        }
        assert_eq!(AT_MOST_ONE_CLAUSES, 2916);
        assert_eq!(AT_LEAST_ONE_CLAUSES, 81);
    }

    #[test]
    fn test_clause_shapes_and_ranges() {
        for family in ConstraintFamily::ALL {
            let expected_len = match family.clause_count() {
                AT_MOST_ONE_CLAUSES => 2,
                _ => SIZE,
            };
            for clause in family.clauses() {
                assert_eq!(clause.len(), expected_len, "{family}: {clause}");
                assert!(clause
                    .iter()
                    .all(|&l| l != 0 && l.unsigned_abs() as usize <= NUM_VARS));
            }
        }
    }

    #[test]
    fn test_polarity() {
        for clause in row_at_most_one().iter().chain(&cell_at_most_one()) {
            assert!(clause.iter().all(|&l| l < 0));
        }
        for clause in box_at_least_one().iter().chain(&cell_at_least_one()) {
            assert!(clause.iter().all(|&l| l > 0));
        }
    }

    #[test]
    fn test_pairwise_exclusions_over_array() {
        let cells = [
            Variable::new(1, 1, 1),
            Variable::new(1, 2, 1),
            Variable::new(2, 1, 1),
        ];
        let clauses: Vec<Clause> = pairwise_exclusions(cells).collect();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].literals(), &[-1, -10]);
        assert_eq!(clauses[1].literals(), &[-1, -82]);
        assert_eq!(clauses[2].literals(), &[-10, -82]);
        assert_eq!(pairwise_exclusions(digits().map(|d| Variable::new(1, 1, d))).count(), PAIRS_PER_SCOPE);
    }

    #[test]
    fn test_no_duplicate_pairs() {
        for family in [
            ConstraintFamily::CellAtMostOne,
            ConstraintFamily::RowAtMostOne,
            ConstraintFamily::ColAtMostOne,
            ConstraintFamily::BoxAtMostOne,
        ] {
            let clauses = family.clauses();
            let unique: HashSet<_> = clauses
                .iter()
                .map(|c| {
                    let (a, b) = (c[0], c[1]);
                    assert!(a.abs() < b.abs(), "{family}: {c} is not ordered");
                    (a, b)
                })
                .collect();
            assert_eq!(unique.len(), clauses.len(), "{family} has duplicates");
        }
    }

    #[test]
    fn test_first_clauses_follow_loop_order() {
        assert_eq!(cell_at_least_one()[0].literals(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(row_at_most_one()[0].literals(), &[-1, -10]);
        assert_eq!(col_at_most_one()[0].literals(), &[-1, -82]);
        assert_eq!(cell_at_most_one()[0].literals(), &[-1, -2]);
        // Box (0, 0), digit 1, cells (1,1) and (1,2).
        assert_eq!(box_at_most_one()[0].literals(), &[-1, -10]);
        assert_eq!(
            box_at_least_one()[0].literals(),
            &[1, 10, 19, 82, 91, 100, 163, 172, 181]
        );
    }

    #[test]
    fn test_box_at_most_one_stays_in_box() {
        for clause in box_at_most_one() {
            let a = Variable::try_from(-clause[0]).unwrap();
            let b = Variable::try_from(-clause[1]).unwrap();
            assert_eq!(a.num, b.num);
            assert_eq!((a.row - 1) / 3, (b.row - 1) / 3);
            assert_eq!((a.col - 1) / 3, (b.col - 1) / 3);
        }
    }

    #[test]
    fn test_families_are_deterministic() {
        for family in ConstraintFamily::ALL {
            assert_eq!(family.clauses(), family.clauses());
        }
    }
}
