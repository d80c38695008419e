//! Error taxonomy shared by the encode and decode stages.
//!
//! Every stage either produces its complete output or returns one of these
//! variants. Nothing is retried and nothing is swallowed, apart from the
//! token-skipping the decoder performs under [`Strictness::Permissive`].
//!
//! [`Strictness::Permissive`]: crate::sat::solver_output::Strictness::Permissive

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top level error returned by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Puzzle text did not describe 81 valid cells.
    #[error("invalid puzzle input: {0}")]
    InputFormat(#[from] InputFormatError),

    /// The input file or stream could not be opened or read.
    #[error("cannot read {}: {source}", source_name(.path.as_deref()))]
    UnreadableSource {
        /// The path, or `None` for stdin.
        path: Option<PathBuf>,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An integer outside `[1, 729]` was decoded as a Sudoku variable.
    #[error("invalid variable {0}: expected a value in [1, 729]")]
    InvalidVariable(i64),

    /// The solver reported that the formula has no model.
    #[error("solver reported UNSAT: puzzle has no solution")]
    Unsatisfiable,

    /// The solver output could not be turned into a grid.
    #[error("malformed assignment: {0}")]
    MalformedAssignment(#[from] AssignmentError),

    /// A DIMACS formula could not be read back.
    #[error("malformed DIMACS at line {line}: {reason}")]
    Dimacs {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    /// True for the expected "no solution" outcome, as opposed to a failure.
    #[must_use]
    pub const fn is_unsatisfiable(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    pub(crate) fn unreadable(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableSource { path, source }
    }
}

fn source_name(path: Option<&std::path::Path>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

/// Why a puzzle text was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    /// Wrong number of non-whitespace symbols.
    #[error("expected exactly 81 non-whitespace characters, got {found}")]
    WrongLength {
        /// How many were present.
        found: usize,
    },

    /// A symbol that is neither a digit nor an empty-cell marker.
    #[error("invalid character '{symbol}' at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// 0-based index among the non-whitespace symbols.
        position: usize,
    },

    /// A collection entry did not have nine rows after its header.
    #[error("grid '{name}' is incomplete: {reason}")]
    IncompleteCollectionEntry {
        /// Header of the offending entry.
        name: String,
        /// The nested failure.
        reason: Box<InputFormatError>,
    },

    /// Two collection entries map to the same output file name.
    #[error("grid '{name}' appears more than once")]
    DuplicateCollectionEntry {
        /// Header of the second occurrence.
        name: String,
    },
}

/// Why solver output could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// No verdict keyword was found.
    #[error("missing SAT/UNSAT verdict")]
    MissingVerdict,

    /// The solver gave up.
    #[error("solver verdict was UNKNOWN")]
    UnknownVerdict,

    /// No digit was assigned true for a cell.
    #[error("cell (row {row}, col {col}) has no digit assigned")]
    EmptyCell {
        /// 1-based row.
        row: usize,
        /// 1-based column.
        col: usize,
    },

    /// More than one digit was assigned true for a cell.
    #[error("cell (row {row}, col {col}) is assigned both {first} and {second}")]
    ConflictingCell {
        /// 1-based row.
        row: usize,
        /// 1-based column.
        col: usize,
        /// First true digit found.
        first: u8,
        /// Second true digit found.
        second: u8,
    },

    /// A literal outside `[-729, 729]` (strict mode only).
    #[error("literal {0} is out of range")]
    OutOfRangeLiteral(i64),

    /// A variable appeared with both polarities (strict mode only).
    #[error("variable {0} is assigned both true and false")]
    ContradictoryLiteral(u32),

    /// The decoded grid disagrees with a clue of the original puzzle.
    #[error("cell (row {row}, col {col}) is {found} but the puzzle gives {expected}")]
    GivenMismatch {
        /// 1-based row.
        row: usize,
        /// 1-based column.
        col: usize,
        /// The clue.
        expected: u8,
        /// The decoded digit.
        found: u8,
    },

    /// A token that is neither a verdict, a comment nor an integer (strict mode only).
    #[error("unrecognised token '{0}'")]
    BadToken(String),
}
