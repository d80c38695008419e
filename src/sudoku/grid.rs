//! The puzzle grid and its text form.

use crate::error::{Error, InputFormatError, Result};
use crate::sudoku::variable::{BOX_SIZE, SIZE, Variable};
use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

/// A 9x9 grid of digits, with 0 for an empty cell.
///
/// Coordinates taken by the accessors are 1-based, matching [`Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid([[u8; SIZE]; SIZE]);

/// Symbols accepted as an empty cell.
pub const EMPTY_SYMBOLS: [char; 4] = ['0', '.', '*', '?'];

/// A 30-clue puzzle with a unique solution, [`EXAMPLE_SOLUTION`].
pub const EXAMPLE_PUZZLE: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// The solution of [`EXAMPLE_PUZZLE`].
pub const EXAMPLE_SOLUTION: [[u8; 9]; 9] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

impl Grid {
    /// Wraps row-major digits. Cells outside `1..=9` count as empty.
    #[must_use]
    pub const fn new(rows: [[u8; SIZE]; SIZE]) -> Self {
        Self(rows)
    }

    /// A grid with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[0; SIZE]; SIZE])
    }

    /// Digit at (row, col), 1-based. 0 means empty.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row - 1][col - 1]
    }

    /// Writes `digit` at (row, col), 1-based.
    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.0[row - 1][col - 1] = digit;
    }

    /// Filled cells as variables, in row-major order.
    ///
    /// Digits are not checked for Sudoku legality; a row of nine `1`s yields
    /// nine givens.
    pub fn givens(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &d)| (1..=9).contains(&d))
                .map(move |(c, &d)| Variable::new(r + 1, c + 1, usize::from(d)))
        })
    }

    /// Number of filled cells.
    #[must_use]
    pub fn given_count(&self) -> usize {
        self.givens().count()
    }

    /// True if every row, column and box holds each digit exactly once.
    #[must_use]
    pub fn is_complete_solution(&self) -> bool {
        (1..=SIZE).all(|i| {
            all_digits_once((1..=SIZE).map(|j| self.get(i, j)))
                && all_digits_once((1..=SIZE).map(|j| self.get(j, i)))
        }) && boxes().all(|(br, bc)| {
            all_digits_once(box_cells(br, bc).into_iter().map(|(r, c)| self.get(r, c)))
        })
    }
}

fn all_digits_once(cells: impl IntoIterator<Item = u8>) -> bool {
    let mut seen = [false; SIZE + 1];
    cells.into_iter().all(|d| {
        let d = usize::from(d);
        (1..=SIZE).contains(&d) && !std::mem::replace(&mut seen[d], true)
    })
}

/// Cells of box `(br, bc)`, both in `[0, 3)`, in row-major order.
#[must_use]
pub fn box_cells(br: usize, bc: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|i| (BOX_SIZE * br + i / BOX_SIZE + 1, BOX_SIZE * bc + i % BOX_SIZE + 1))
}

/// All boxes as `(br, bc)` pairs in row-major order.
pub fn boxes() -> impl Iterator<Item = (usize, usize)> {
    (0..BOX_SIZE).flat_map(|br| (0..BOX_SIZE).map(move |bc| (br, bc)))
}

impl From<[[u8; SIZE]; SIZE]> for Grid {
    fn from(rows: [[u8; SIZE]; SIZE]) -> Self {
        Self::new(rows)
    }
}

/// Parses puzzle text: exactly 81 symbols besides ASCII whitespace, each a digit
/// `1`-`9` or one of the empty markers `0 . * ?`.
impl FromStr for Grid {
    type Err = InputFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if symbols.len() != SIZE * SIZE {
            return Err(InputFormatError::WrongLength {
                found: symbols.len(),
            });
        }

        let mut grid = Self::empty();
        for (position, &symbol) in symbols.iter().enumerate() {
            let digit = match symbol {
                '1'..='9' => symbol as u8 - b'0',
                s if EMPTY_SYMBOLS.contains(&s) => 0,
                _ => return Err(InputFormatError::InvalidSymbol { symbol, position }),
            };
            grid.0[position / SIZE][position % SIZE] = digit;
        }
        Ok(grid)
    }
}

/// Nine lines of nine digits, without a trailing newline.
impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for d in row {
                write!(f, "{d}")?;
            }
        }
        Ok(())
    }
}

/// Reads and parses a puzzle file.
///
/// # Errors
///
/// [`Error::UnreadableSource`] if the file cannot be read, otherwise
/// [`Error::InputFormat`] if its content is not a puzzle.
pub fn parse_sudoku_file(path: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::unreadable(Some(path.to_path_buf()), e))?;
    Ok(text.parse()?)
}
