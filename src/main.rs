//! # sudoku-sat
//!
//! `sudoku-sat` turns 9x9 Sudoku puzzles into SAT problems and turns SAT
//! solver answers back into solved grids. Solving itself is left to any
//! external DIMACS solver.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a puzzle (file or stdin) to DIMACS on stdout
//! sudoku-sat encode puzzle.txt > puzzle.cnf
//!
//! # Use the extended encoding, which adds redundant clauses
//! sudoku-sat encode --encoding extended puzzle.txt -o puzzle.cnf
//!
//! # Encode every grid of a "Grid NN" collection into out/grid_NN.cnf
//! sudoku-sat encode --collection top95.txt --out-dir out
//!
//! # Encode every .sudoku/.txt file under a directory
//! sudoku-sat encode-dir puzzles/
//!
//! # Decode the solver's answer
//! minisat puzzle.cnf answer.txt; sudoku-sat decode answer.txt
//! ```
//!
//! Logging goes to stderr. `--debug` turns on debug output, otherwise
//! `RUST_LOG` is honoured.
//!
//! Exit codes: 0 on success, 20 when the solver reported UNSAT, 1 for any
//! other error.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod command_line {
    pub(crate) mod cli;
}

use command_line::cli::{Cli, run};

/// Exit status for an unsatisfiable puzzle, as SAT solvers use.
const EXIT_UNSAT: u8 = 20;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reports `result` on stderr and maps it to the process exit status.
fn exit_code(result: &sudoku_sat::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_unsatisfiable() => {
            eprintln!("UNSAT: puzzle has no solution.");
            ExitCode::from(EXIT_UNSAT)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    exit_code(&run(cli))
}
