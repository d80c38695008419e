//! Files holding many puzzles.
//!
//! Two layouts are read, and may be mixed:
//!
//! ```text
//! Grid 01
//! 003020600
//! 900305001
//! ...           (nine rows in total)
//! ```
//!
//! or one puzzle per line, 81 symbols with `.` or `0` for blanks. Unnamed
//! puzzles are named `Grid NN` by position.

use crate::error::{InputFormatError, Result};
use crate::sudoku::grid::Grid;
use crate::sudoku::variable::SIZE;
use std::collections::HashSet;

/// A puzzle and the name it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGrid {
    /// The `Grid NN` header, or a positional name for unheaded puzzles.
    pub name: String,
    /// The puzzle itself.
    pub grid: Grid,
}

impl NamedGrid {
    /// A file-name friendly form of the name, e.g. `grid_07`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }
}

fn default_name(index: usize) -> String {
    format!("Grid {index:02}")
}

/// Parses every puzzle in `text`, in order.
///
/// # Errors
///
/// [`InputFormatError`] for a headed entry without nine rows, a single-line
/// puzzle of the wrong length or with an invalid symbol, or two entries
/// sharing a [`NamedGrid::file_stem`].
pub fn parse_collection(text: &str) -> Result<Vec<NamedGrid>> {
    let mut grids = Vec::new();
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();

    while let Some(line) = lines.next() {
        if line.starts_with("Grid") {
            let mut body = String::new();
            for _ in 0..SIZE {
                match lines.peek() {
                    Some(&next) if !next.starts_with("Grid") => {
                        body.push_str(next);
                        lines.next();
                    }
                    _ => break,
                }
            }
            let grid = body
                .parse()
                .map_err(|e| InputFormatError::IncompleteCollectionEntry {
                    name: line.to_string(),
                    reason: Box::new(e),
                })?;
            grids.push(NamedGrid {
                name: line.to_string(),
                grid,
            });
        } else {
            grids.push(NamedGrid {
                name: default_name(grids.len() + 1),
                grid: line.parse()?,
            });
        }
    }

    let mut stems = HashSet::with_capacity(grids.len());
    if let Some(dup) = grids.iter().find(|g| !stems.insert(g.file_stem())) {
        return Err(InputFormatError::DuplicateCollectionEntry {
            name: dup.name.clone(),
        }
        .into());
    }

    Ok(grids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sudoku::grid::EXAMPLE_PUZZLE;

    const HEADED: &str = "Grid 01\n\
                          530070000\n600195000\n098000060\n\
                          800060003\n400803001\n700020006\n\
                          060000280\n000419005\n000080079\n\
                          Grid 02\n\
                          000000000\n000000000\n000000000\n\
                          000000000\n000000000\n000000000\n\
                          000000000\n000000000\n000000001\n";

    #[test]
    fn test_headed_entries() {
        let grids = parse_collection(HEADED).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].name, "Grid 01");
        assert_eq!(grids[0].grid, Grid::from(EXAMPLE_PUZZLE));
        assert_eq!(grids[1].grid.given_count(), 1);
        assert_eq!(grids[1].file_stem(), "grid_02");
    }

    #[test]
    fn test_one_per_line() {
        let line = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let text = format!("{line}\n\n{line}\n");
        let grids = parse_collection(&text).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[1].name, "Grid 02");
        assert_eq!(grids[0].grid, Grid::from(EXAMPLE_PUZZLE));
    }

    #[test]
    fn test_truncated_entry() {
        let text = "Grid 01\n530070000\n600195000\nGrid 02\n";
        let err = parse_collection(text).unwrap_err();
        assert!(err.to_string().contains("Grid 01"), "{err}");
    }

    #[test]
    fn test_bad_single_line() {
        assert!(parse_collection("123\n").is_err());
    }

    #[test]
    fn test_duplicate_headers_are_rejected() {
        let empty = "000000000\n".repeat(9);
        let text = format!("Grid 01\n{empty}Grid 01\n111111111\n{}", "000000000\n".repeat(8));
        let err = parse_collection(&text).unwrap_err();
        assert!(matches!(
            err,
            Error::InputFormat(InputFormatError::DuplicateCollectionEntry { ref name }) if name == "Grid 01"
        ));
    }

    #[test]
    fn test_header_clashing_with_positional_name() {
        let line = "0".repeat(81);
        let text = format!("{line}\nGrid 01\n{}", "000000000\n".repeat(9));
        assert!(parse_collection(&text).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_collection("").unwrap().is_empty());
    }
}
