#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading and writing the DIMACS CNF file format.
//!
//! The format is:
//! - Comment lines starting with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - Clause lines: signed integer literals terminated by `0`.
//! - An optional `%` line marking end-of-data.
//!
//! Writing never reorders or deduplicates clauses. Reading is used to load a
//! formula back, mostly to check what was written.

use crate::error::{Error, Result};
use crate::sat::cnf::{Clause, Cnf, Literal};
use std::io::{BufRead, Write};

/// Writes `cnf` to `writer` in DIMACS format.
///
/// # Errors
///
/// Returns [`Error::Write`] if the writer fails.
pub fn write_dimacs<W: Write>(cnf: &Cnf, writer: &mut W) -> Result<()> {
    writeln!(writer, "p cnf {} {}", cnf.num_vars, cnf.len()).map_err(Error::Write)?;
    for clause in cnf {
        writeln!(writer, "{clause}").map_err(Error::Write)?;
    }
    writer.flush().map_err(Error::Write)
}

/// Parses DIMACS text from a `BufRead` source.
///
/// Clauses may span several lines; a `0` closes the current clause. Literals
/// left open at end of input form a final clause. The header counts are
/// checked: declared clauses must match and no literal may exceed the
/// declared variable count.
///
/// # Errors
///
/// - [`Error::UnreadableSource`] if reading fails.
/// - [`Error::Dimacs`] for a missing or malformed header, a non-integer token,
///   an out-of-range literal, or a clause count mismatch.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut current: Vec<Literal> = Vec::new();
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::unreadable(None, e))?;
        let line_no = idx + 1;
        last_line = line_no;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c") => {}
            Some(&"p") => {
                if header.is_some() {
                    return Err(dimacs_error(line_no, "duplicate problem line"));
                }
                header = Some(parse_header(line_no, parts)?);
            }
            Some(_) => {
                let Some((num_vars, _)) = header else {
                    return Err(dimacs_error(line_no, "clause before problem line"));
                };
                for token in parts {
                    let lit: Literal = token.parse().map_err(|_| {
                        dimacs_error(line_no, format!("'{token}' is not a literal"))
                    })?;
                    if lit == 0 {
                        if !current.is_empty() {
                            clauses.push(Clause::new(current.drain(..)));
                        }
                    } else if lit.unsigned_abs() as usize > num_vars {
                        return Err(dimacs_error(
                            line_no,
                            format!("literal {lit} exceeds {num_vars} variables"),
                        ));
                    } else {
                        current.push(lit);
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        clauses.push(Clause::new(current));
    }

    let (num_vars, num_clauses) =
        header.ok_or_else(|| dimacs_error(last_line.max(1), "missing problem line"))?;
    if num_clauses != clauses.len() {
        return Err(dimacs_error(
            last_line,
            format!(
                "header declares {num_clauses} clauses but {} were found",
                clauses.len()
            ),
        ));
    }

    Ok(Cnf::new(num_vars, clauses))
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_dimacs_str(input: &str) -> Result<Cnf> {
    parse_dimacs(input.as_bytes())
}

fn parse_header<'a>(line: usize, parts: impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    let fields: Vec<&str> = parts.collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let vars = vars
                .parse()
                .map_err(|_| dimacs_error(line, format!("bad variable count '{vars}'")))?;
            let clauses = clauses
                .parse()
                .map_err(|_| dimacs_error(line, format!("bad clause count '{clauses}'")))?;
            Ok((vars, clauses))
        }
        _ => Err(dimacs_error(line, "expected 'p cnf <vars> <clauses>'")),
    }
}

fn dimacs_error(line: usize, reason: impl Into<String>) -> Error {
    Error::Dimacs {
        line,
        reason: reason.into(),
    }
}
