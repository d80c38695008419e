#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! In-memory CNF formulas.
//!
//! A [`Cnf`] is an ordered list of [`Clause`]s plus a declared variable count.
//! Clause order is preserved exactly as built, which keeps the DIMACS output
//! byte-for-byte reproducible for a given input.

use crate::sat::assignment::Valuation;
use smallvec::SmallVec;
use std::fmt::{self, Display};
use std::ops::Index;

/// A signed DIMACS literal. Never zero.
pub type Literal = i32;

/// A positive variable identifier.
pub type Variable = u32;

/// Returns the variable a literal refers to.
#[must_use]
pub const fn var_of_lit(l: Literal) -> Variable {
    l.unsigned_abs()
}

/// A disjunction of literals.
///
/// Sudoku clauses never hold more than nine literals, so they stay inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause(SmallVec<[Literal; 9]>);

impl Clause {
    /// Builds a clause from its literals in the given order.
    ///
    /// # Panics
    ///
    /// In debug builds, if `literals` is empty or contains a zero.
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let lits: SmallVec<[Literal; 9]> = literals.into_iter().collect();
        debug_assert!(!lits.is_empty(), "clauses must not be empty");
        debug_assert!(lits.iter().all(|&l| l != 0), "zero is not a literal");
        Self(lits)
    }

    /// A single-literal clause.
    #[must_use]
    pub fn unit(literal: Literal) -> Self {
        Self::new([literal])
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for clauses built through [`Clause::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the clause has exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.0.len() == 1
    }

    /// Literals in order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    /// Literals as a slice.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    /// True if at least one literal is true under `valuation`.
    /// Unassigned variables never satisfy a literal.
    #[must_use]
    pub fn is_satisfied_by(&self, valuation: &Valuation) -> bool {
        self.0
            .iter()
            .any(|&l| valuation.literal_value(l) == Some(true))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<const N: usize> From<[Literal; N]> for Clause {
    fn from(literals: [Literal; N]) -> Self {
        Self::new(literals)
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Writes the clause as a DIMACS line body: each literal followed by a space,
/// then the `0` terminator.
impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.0 {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

/// A formula in conjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The declared number of variables, written in the `p cnf` header.
    pub num_vars: usize,
    /// Clauses in emission order.
    pub clauses: Vec<Clause>,
}

impl Cnf {
    /// A formula over `num_vars` variables.
    #[must_use]
    pub const fn new(num_vars: usize, clauses: Vec<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether there are no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Appends clauses, keeping their order.
    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.clauses.extend(clauses);
    }

    /// Checks every clause against `valuation`.
    #[must_use]
    pub fn is_satisfied_by(&self, valuation: &Valuation) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(valuation))
    }

    /// Index of the first clause `valuation` fails, if any.
    #[must_use]
    pub fn first_unsatisfied(&self, valuation: &Valuation) -> Option<usize> {
        self.clauses.iter().position(|c| !c.is_satisfied_by(valuation))
    }
}

/// Renders the formula in DIMACS CNF: a `p cnf` header followed by one line
/// per clause.
impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
