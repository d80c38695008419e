#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Parsing the output of an external SAT solver.
//!
//! Two shapes are accepted without structural assumptions beyond
//! "tokens are whitespace or line separated":
//!
//! 1. `SAT` on the first line followed by a single line of literals ending in `0`.
//! 2. Free-form output such as the SAT competition format, with `c` comment
//!    lines, `s SATISFIABLE` verdict lines and any number of `v ... 0` value
//!    lines.
//!
//! Every token is classified as a verdict keyword, a line marker, an integer
//! or something unrecognised. What happens to unrecognised tokens and
//! out-of-range literals is decided by [`Strictness`].

use crate::error::{AssignmentError, Error, Result};
use crate::sat::assignment::Valuation;
use crate::sat::cnf::{Literal, Variable};
use clap::ValueEnum;
use std::fmt::Display;
use tracing::{debug, warn};

/// How forgiving the decoder is with noisy solver output.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum Strictness {
    /// Skip unrecognised tokens and out-of-range literals; the last literal
    /// for a variable wins; a missing verdict is accepted if literals follow.
    #[default]
    Permissive,
    /// Reject unrecognised tokens, out-of-range literals, contradictory
    /// literals and a missing verdict.
    Strict,
}

impl Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// The solver's outcome for a formula.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum Verdict {
    /// A model follows.
    Satisfiable,
    /// No model exists.
    Unsatisfiable,
    /// The solver gave up or timed out.
    Unknown,
}

impl Verdict {
    /// Recognises `SAT`, `SATISFIABLE`, `UNSAT`, `UNSATISFIABLE`, `UNKNOWN`
    /// and `INDETERMINATE`, ignoring case.
    #[must_use]
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "SAT" | "SATISFIABLE" => Some(Self::Satisfiable),
            "UNSAT" | "UNSATISFIABLE" => Some(Self::Unsatisfiable),
            "UNKNOWN" | "INDETERMINATE" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// One classified token of solver output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A verdict keyword.
    Verdict(Verdict),
    /// `s` or `v` line prefixes.
    Marker,
    /// Any integer, including the `0` terminator. Values beyond `i64`
    /// saturate, so they still read as out of range.
    Integer(i64),
    /// Anything else, kept verbatim.
    Unrecognized(&'a str),
}

impl<'a> Token<'a> {
    /// Classifies a single whitespace-free token.
    #[must_use]
    pub fn classify(token: &'a str) -> Self {
        if token == "s" || token == "v" {
            return Self::Marker;
        }
        if let Some(verdict) = Verdict::from_keyword(token) {
            return Self::Verdict(verdict);
        }
        parse_integer(token).map_or(Self::Unrecognized(token), Self::Integer)
    }
}

/// An optionally signed run of ASCII digits, saturated to the `i64` range.
fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let saturated = if token.starts_with('-') { i64::MIN } else { i64::MAX };
    Some(token.parse().unwrap_or(saturated))
}

/// Lines whose first token is `c`, or that start with `#`, are comments.
fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#') || trimmed.split_whitespace().next() == Some("c")
}

/// Splits solver output into classified tokens, skipping comment lines.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token<'_>> {
    input
        .lines()
        .filter(|line| !is_comment(line))
        .flat_map(str::split_whitespace)
        .map(Token::classify)
}

/// The verdict and nonzero literals read from solver output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverOutput {
    /// The first verdict keyword seen, if any.
    pub verdict: Option<Verdict>,
    /// Nonzero integers in input order. Range is not checked here.
    pub literals: Vec<i64>,
}

impl SolverOutput {
    /// Scans `input` and collects its verdict and literals.
    ///
    /// An `UNSAT` verdict short-circuits the scan.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsatisfiable`] if the solver reported UNSAT.
    /// - [`AssignmentError::BadToken`] for an unrecognised token in strict mode.
    pub fn parse(input: &str, strictness: Strictness) -> Result<Self> {
        let mut output = Self::default();

        for token in tokenize(input) {
            match token {
                Token::Verdict(Verdict::Unsatisfiable) => return Err(Error::Unsatisfiable),
                Token::Verdict(verdict) => {
                    if output.verdict.is_none() {
                        output.verdict = Some(verdict);
                    }
                }
                Token::Marker | Token::Integer(0) => {}
                Token::Integer(lit) => output.literals.push(lit),
                Token::Unrecognized(tok) => match strictness {
                    Strictness::Strict => {
                        return Err(AssignmentError::BadToken(tok.to_string()).into());
                    }
                    Strictness::Permissive => warn!(token = tok, "skipping unrecognised token"),
                },
            }
        }

        debug!(
            verdict = ?output.verdict,
            literals = output.literals.len(),
            "parsed solver output"
        );
        Ok(output)
    }

    /// Turns the output into a valuation over `1..=num_vars`.
    ///
    /// # Errors
    ///
    /// - [`AssignmentError::UnknownVerdict`] if the solver gave up.
    /// - [`AssignmentError::MissingVerdict`] if no verdict was given, in strict
    ///   mode always and in permissive mode only when there are no literals either.
    /// - [`AssignmentError::OutOfRangeLiteral`] and
    ///   [`AssignmentError::ContradictoryLiteral`] in strict mode.
    pub fn into_valuation(self, num_vars: usize, strictness: Strictness) -> Result<Valuation> {
        match (self.verdict, strictness) {
            (Some(Verdict::Unsatisfiable), _) => return Err(Error::Unsatisfiable),
            (Some(Verdict::Unknown), _) => return Err(AssignmentError::UnknownVerdict.into()),
            (Some(Verdict::Satisfiable), _) => {}
            (None, Strictness::Strict) => return Err(AssignmentError::MissingVerdict.into()),
            (None, Strictness::Permissive) => {
                if self.literals.is_empty() {
                    return Err(AssignmentError::MissingVerdict.into());
                }
                debug!("no verdict keyword, treating literal stream as a model");
            }
        }

        let mut valuation = Valuation::new(num_vars);
        let mut skipped = 0usize;

        for lit in self.literals {
            let var = lit.unsigned_abs();
            if var > num_vars as u64 {
                if strictness == Strictness::Strict {
                    return Err(AssignmentError::OutOfRangeLiteral(lit).into());
                }
                skipped += 1;
                continue;
            }

            // In range, so both conversions are lossless.
            let var = Variable::try_from(var).map_err(|_| Error::InvalidVariable(lit))?;
            let lit = Literal::try_from(lit).map_err(|_| Error::InvalidVariable(lit))?;
            if strictness == Strictness::Strict
                && valuation.var_value(var).is_some_and(|b| b != (lit > 0))
            {
                return Err(AssignmentError::ContradictoryLiteral(var).into());
            }
            valuation.assign_literal(lit);
        }

        if skipped > 0 {
            debug!(skipped, "ignored out-of-range literals");
        }
        Ok(valuation)
    }
}

/// Parses solver output straight into a valuation.
///
/// # Errors
///
/// See [`SolverOutput::parse`] and [`SolverOutput::into_valuation`].
pub fn parse_valuation(input: &str, num_vars: usize, strictness: Strictness) -> Result<Valuation> {
    SolverOutput::parse(input, strictness)?.into_valuation(num_vars, strictness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tokens() {
        assert_eq!(Token::classify("SAT"), Token::Verdict(Verdict::Satisfiable));
        assert_eq!(
            Token::classify("unsatisfiable"),
            Token::Verdict(Verdict::Unsatisfiable)
        );
        assert_eq!(Token::classify("UNKNOWN"), Token::Verdict(Verdict::Unknown));
        assert_eq!(Token::classify("v"), Token::Marker);
        assert_eq!(Token::classify("-17"), Token::Integer(-17));
        assert_eq!(Token::classify("0"), Token::Integer(0));
        assert_eq!(Token::classify("1x"), Token::Unrecognized("1x"));
        assert_eq!(Token::classify("-"), Token::Unrecognized("-"));
        assert_eq!(Token::classify("+4"), Token::Integer(4));
    }

    #[test]
    fn test_oversized_integer_stays_an_integer() {
        assert_eq!(
            Token::classify("99999999999999999999"),
            Token::Integer(i64::MAX)
        );
        assert_eq!(
            Token::classify("-99999999999999999999"),
            Token::Integer(i64::MIN)
        );

        let input = "SAT\n1 99999999999999999999 0\n";
        let err = parse_valuation(input, 729, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::OutOfRangeLiteral(i64::MAX))
        ));

        let valuation = parse_valuation(input, 729, Strictness::Permissive).unwrap();
        assert_eq!(valuation.var_value(1), Some(true));
        assert_eq!(valuation.assigned_count(), 1);
    }

    #[test]
    fn test_tokenize_skips_comments() {
        let tokens: Vec<_> = tokenize("c solver v1.0\n# note\nSAT\n1 -2 0\n").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Verdict(Verdict::Satisfiable),
                Token::Integer(1),
                Token::Integer(-2),
                Token::Integer(0),
            ]
        );
    }

    #[test]
    fn test_two_line_shape() {
        let out = SolverOutput::parse("SAT\n1 -2 3 0\n", Strictness::Strict).unwrap();
        assert_eq!(out.verdict, Some(Verdict::Satisfiable));
        assert_eq!(out.literals, vec![1, -2, 3]);
    }

    #[test]
    fn test_competition_shape() {
        let input = "c comment\ns SATISFIABLE\nv 1 -2\nv 3 0\n";
        let out = SolverOutput::parse(input, Strictness::Strict).unwrap();
        assert_eq!(out.verdict, Some(Verdict::Satisfiable));
        assert_eq!(out.literals, vec![1, -2, 3]);
    }

    #[test]
    fn test_unsat_short_circuits() {
        let err = SolverOutput::parse("UNSAT\n", Strictness::Permissive).unwrap_err();
        assert!(err.is_unsatisfiable());

        let err = SolverOutput::parse("s UNSATISFIABLE\ngarbage", Strictness::Strict).unwrap_err();
        assert!(err.is_unsatisfiable());
    }

    #[test]
    fn test_unrecognised_token_by_strictness() {
        let input = "SAT\n1 foo 2 0\n";
        let out = SolverOutput::parse(input, Strictness::Permissive).unwrap();
        assert_eq!(out.literals, vec![1, 2]);

        let err = SolverOutput::parse(input, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::BadToken(ref t)) if t == "foo"
        ));
    }

    #[test]
    fn test_unknown_verdict_is_malformed() {
        let err = parse_valuation("UNKNOWN\n", 3, Strictness::Permissive).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::UnknownVerdict)
        ));
    }

    #[test]
    fn test_missing_verdict() {
        let valuation = parse_valuation("1 -2 3 0", 3, Strictness::Permissive).unwrap();
        assert_eq!(valuation.var_value(3), Some(true));

        let err = parse_valuation("1 -2 3 0", 3, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::MissingVerdict)
        ));

        let err = parse_valuation("", 3, Strictness::Permissive).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::MissingVerdict)
        ));
    }

    #[test]
    fn test_out_of_range_literals() {
        let input = "SAT\n1 -800 730 2 0\n";
        let valuation = parse_valuation(input, 729, Strictness::Permissive).unwrap();
        assert_eq!(valuation.assigned_count(), 2);

        let err = parse_valuation(input, 729, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::OutOfRangeLiteral(-800))
        ));
    }

    #[test]
    fn test_contradictory_literals() {
        let input = "SAT\n1 -1 0\n";
        let valuation = parse_valuation(input, 1, Strictness::Permissive).unwrap();
        assert_eq!(valuation.var_value(1), Some(false));

        let err = parse_valuation(input, 1, Strictness::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedAssignment(AssignmentError::ContradictoryLiteral(1))
        ));
    }

    #[test]
    fn test_repeated_literal_is_not_contradictory() {
        let valuation = parse_valuation("SAT\n2 2 0", 2, Strictness::Strict).unwrap();
        assert_eq!(valuation.var_value(2), Some(true));
    }

    #[test]
    fn test_strictness_display_matches_value_names() {
        for s in Strictness::value_variants() {
            let name = s.to_possible_value().unwrap();
            assert_eq!(name.get_name(), s.to_string());
        }
    }
}
