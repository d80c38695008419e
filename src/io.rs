//! Reading inputs and writing outputs for the two pipeline stages.
//!
//! Each stage reads its whole input before doing any work and writes its
//! output in one go, so a failure never leaves partial output behind.

use crate::error::{Error, Result};
use crate::sat::cnf::Cnf;
use crate::sat::dimacs::write_dimacs;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Reads all of `path`, or stdin when `path` is `None`.
///
/// # Errors
///
/// [`Error::UnreadableSource`] if the source cannot be opened or read.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).map_err(|e| Error::unreadable(Some(p.to_path_buf()), e))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| Error::unreadable(None, e))?;
            Ok(text)
        }
    }
}

/// Writes `cnf` as DIMACS to `path`, or stdout when `path` is `None`.
///
/// # Errors
///
/// [`Error::Write`] if the file cannot be created or written.
pub fn write_formula(cnf: &Cnf, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            let file = std::fs::File::create(p).map_err(Error::Write)?;
            write_dimacs(cnf, &mut BufWriter::new(file))
        }
        None => {
            let stdout = std::io::stdout();
            write_dimacs(cnf, &mut BufWriter::new(stdout.lock()))
        }
    }
}

/// Writes `text` followed by a newline to stdout.
///
/// # Errors
///
/// [`Error::Write`] if stdout is closed.
pub fn write_text(text: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}").and_then(|()| out.flush()).map_err(Error::Write)
}
