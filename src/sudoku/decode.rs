//! Turning a solver's assignment back into a grid.

use crate::error::{AssignmentError, Result};
use crate::sat::assignment::Valuation;
use crate::sat::solver_output::{Strictness, parse_valuation};
use crate::sudoku::grid::Grid;
use crate::sudoku::variable::{NUM_VARS, SIZE, Variable};
use tracing::{debug, warn};

/// Builds the grid from every variable valued true.
///
/// # Errors
///
/// [`AssignmentError::ConflictingCell`] if two true variables name different
/// digits for one cell, [`AssignmentError::EmptyCell`] if a cell has none.
pub fn decode_valuation(valuation: &Valuation) -> Result<Grid> {
    let mut grid = Grid::empty();

    for var in valuation.true_variables() {
        let Variable { row, col, num } = Variable::decode(var as usize)?;
        // num is at most 9.
        #[allow(clippy::cast_possible_truncation)]
        let digit = num as u8;
        match grid.get(row, col) {
            0 => grid.set(row, col, digit),
            first => {
                return Err(AssignmentError::ConflictingCell {
                    row,
                    col,
                    first,
                    second: digit,
                }
                .into());
            }
        }
    }

    for row in 1..=SIZE {
        for col in 1..=SIZE {
            if grid.get(row, col) == 0 {
                return Err(AssignmentError::EmptyCell { row, col }.into());
            }
        }
    }

    if !grid.is_complete_solution() {
        warn!("decoded grid breaks a row, column or box rule");
    }
    Ok(grid)
}

/// Parses raw solver output and decodes it into a grid.
///
/// # Errors
///
/// [`Error::Unsatisfiable`](crate::error::Error::Unsatisfiable) when the
/// solver found no model; any error of [`parse_valuation`] or
/// [`decode_valuation`] otherwise.
pub fn decode_solver_output(input: &str, strictness: Strictness) -> Result<Grid> {
    let valuation = parse_valuation(input, NUM_VARS, strictness)?;
    debug!(assigned = valuation.assigned_count(), %strictness, "decoding valuation");
    decode_valuation(&valuation)
}

/// Fails on the first clue of `puzzle` that `solution` does not keep.
///
/// # Errors
///
/// [`AssignmentError::GivenMismatch`] naming the cell.
pub fn check_against_puzzle(solution: &Grid, puzzle: &Grid) -> Result<()> {
    match puzzle
        .givens()
        .find(|v| usize::from(solution.get(v.row, v.col)) != v.num)
    {
        Some(v) => Err(AssignmentError::GivenMismatch {
            row: v.row,
            col: v.col,
            expected: puzzle.get(v.row, v.col),
            found: solution.get(v.row, v.col),
        }
        .into()),
        None => Ok(()),
    }
}
