//! Numbering of the 729 cell/digit propositions.

use crate::error::Error;
use crate::sat::cnf::Literal;

/// Side length of the grid, and the number of digits.
pub const SIZE: usize = 9;

/// Side length of a box.
pub const BOX_SIZE: usize = 3;

/// Number of propositional variables: one per (row, column, digit).
pub const NUM_VARS: usize = SIZE * SIZE * SIZE;

/// The proposition "cell (row, col) holds digit `num`", all 1-based.
///
/// Maps to the integers `[1, 729]` by `81·(row−1) + 9·(col−1) + num`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row, `1..=9` from the top.
    pub row: usize,
    /// Column, `1..=9` from the left.
    pub col: usize,
    /// The digit.
    pub num: usize,
}

impl Variable {
    /// Callers must pass coordinates and digit in `[1, 9]`.
    #[must_use]
    pub const fn new(row: usize, col: usize, num: usize) -> Self {
        debug_assert!(row >= 1 && row <= SIZE);
        debug_assert!(col >= 1 && col <= SIZE);
        debug_assert!(num >= 1 && num <= SIZE);
        Self { row, col, num }
    }

    /// The DIMACS variable number, in `[1, 729]`.
    #[must_use]
    pub const fn encode(&self) -> usize {
        (self.row - 1) * SIZE * SIZE + (self.col - 1) * SIZE + self.num
    }

    /// The inverse of [`Variable::encode`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVariable`] unless `var` is in `[1, 729]`.
    pub fn decode(var: usize) -> Result<Self, Error> {
        if var == 0 || var > NUM_VARS {
            return Err(Error::InvalidVariable(i64::try_from(var).unwrap_or(i64::MAX)));
        }
        let v = var - 1;
        Ok(Self {
            row: v / (SIZE * SIZE) + 1,
            col: (v % (SIZE * SIZE)) / SIZE + 1,
            num: v % SIZE + 1,
        })
    }

    /// The positive literal asserting this proposition.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn positive(&self) -> Literal {
        // encode() is at most 729.
        self.encode() as Literal
    }

    /// The negative literal denying this proposition.
    #[must_use]
    pub const fn negative(&self) -> Literal {
        -self.positive()
    }
}

impl TryFrom<Literal> for Variable {
    type Error = Error;

    /// Decodes the variable of a positive literal.
    fn try_from(lit: Literal) -> Result<Self, Self::Error> {
        usize::try_from(lit)
            .map_err(|_| Error::InvalidVariable(i64::from(lit)))
            .and_then(Self::decode)
    }
}
