//! Truth values read from a solver model.

use crate::sat::cnf::{Literal, Variable, var_of_lit};

/// The value of a single variable in a [`Valuation`].
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// No value has been read for the variable.
    #[default]
    Unassigned,
    /// The variable holds this value.
    Assigned(bool),
}

impl VarState {
    /// Whether a value has been read.
    pub const fn is_assigned(&self) -> bool {
        matches!(self, VarState::Assigned(_))
    }

}

/// Maps each variable in `[1, n]` to unset, true or false.
///
/// Index 0 is allocated but never used, so variables index directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Valuation(Vec<VarState>);

impl Valuation {
    /// An all-unassigned valuation over variables `1..=n`.
    pub fn new(n: usize) -> Self {
        Valuation(vec![VarState::Unassigned; n + 1])
    }

    /// Builds a valuation from literals, ignoring any whose variable exceeds `n`.
    /// Later literals override earlier ones for the same variable.
    pub fn from_literals(n: usize, literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut valuation = Self::new(n);
        for lit in literals {
            valuation.assign_literal(lit);
        }
        valuation
    }

    /// Whether `var` falls in `[1, num_vars]`.
    pub fn in_range(&self, var: Variable) -> bool {
        var != 0 && (var as usize) < self.0.len()
    }

    /// Assigns `b` to `var`, which must be in range.
    pub fn set(&mut self, var: Variable, b: bool) {
        self.0[var as usize] = VarState::Assigned(b);
    }

    /// Makes `lit` true. Returns `false` without changing anything when the
    /// literal is zero or its variable is out of range.
    pub fn assign_literal(&mut self, lit: Literal) -> bool {
        let var = var_of_lit(lit);
        if !self.in_range(var) {
            return false;
        }
        self.set(var, lit > 0);
        true
    }

    /// The value of `var`, or `None` when unassigned or out of range.
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        if var == 0 {
            return None;
        }
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// The truth of literal `l`, or `None` when its variable is unassigned.
    pub fn literal_value(&self, l: Literal) -> Option<bool> {
        let b = self.var_value(var_of_lit(l))?;
        if l < 0 { Some(!b) } else { Some(b) }
    }

    /// Variables assigned true, in ascending order.
    pub fn true_variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, s)| match s {
                VarState::Assigned(true) => Variable::try_from(i).ok(),
                _ => None,
            })
    }

    /// Number of variables with a value.
    pub fn assigned_count(&self) -> usize {
        self.0.iter().skip(1).filter(|s| s.is_assigned()).count()
    }
}
