use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use sudoku_sat::error::Result;
use sudoku_sat::io::{read_input, write_formula, write_text};
use sudoku_sat::sudoku::collection::parse_collection;
use sudoku_sat::sudoku::decode::{check_against_puzzle, decode_solver_output};
use sudoku_sat::sudoku::grid::parse_sudoku_file;
use sudoku_sat::{EncodingPolicy, Grid, Strictness};
use tracing::{debug, info, warn};

/// Defines the command-line interface for the sudoku-sat application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-sat",
    version,
    about = "Translate Sudoku puzzles to DIMACS CNF and SAT solver output back to grids"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr. Otherwise `RUST_LOG` decides, defaulting to warnings.
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Encode a puzzle as a DIMACS CNF formula.
    /// The puzzle is 81 symbols, digits 1-9 for clues and 0 . * ? for blanks;
    /// whitespace is ignored.
    Encode {
        /// Puzzle file. Reads stdin if omitted.
        path: Option<PathBuf>,

        /// Write the formula here instead of stdout.
        #[arg(short, long, conflicts_with = "collection")]
        output: Option<PathBuf>,

        /// Treat the input as a collection of "Grid NN" entries or one
        /// puzzle per line, writing one formula per puzzle.
        #[arg(long, default_value_t = false)]
        collection: bool,

        /// Directory for the per-puzzle formulas of a collection.
        #[arg(long, requires = "collection", default_value = ".")]
        out_dir: PathBuf,

        /// Options for this subcommand.
        #[command(flatten)]
        encode: EncodeOptions,
    },

    /// Encode every `.sudoku` and `.txt` puzzle under a directory, writing
    /// `<file>.cnf` next to each.
    EncodeDir {
        /// Directory to walk.
        path: PathBuf,

        /// Options for this subcommand.
        #[command(flatten)]
        encode: EncodeOptions,
    },

    /// Decode SAT solver output into a solved grid.
    /// Accepts "SAT" followed by a literal line, or competition style
    /// "s"/"v" lines.
    Decode {
        /// Solver output file. Reads stdin if omitted.
        path: Option<PathBuf>,

        /// How to treat noise in the solver output.
        #[arg(long, default_value_t = Strictness::Permissive)]
        strictness: Strictness,

        /// Original puzzle; the decoded grid must keep all of its clues.
        #[arg(long)]
        puzzle: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by the encoding subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct EncodeOptions {
    /// Which clause families to emit.
    #[arg(short, long, default_value_t = EncodingPolicy::Minimal)]
    pub(crate) encoding: EncodingPolicy,
}

/// Runs the parsed command.
///
/// # Errors
///
/// Whatever the selected stage fails with.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode {
            path,
            output,
            collection: false,
            encode,
            ..
        } => encode_puzzle(path.as_deref(), output.as_deref(), encode.encoding),
        Commands::Encode {
            path,
            collection: true,
            out_dir,
            encode,
            ..
        } => encode_collection(path.as_deref(), &out_dir, encode.encoding),
        Commands::EncodeDir { path, encode } => encode_dir(&path, encode.encoding),
        Commands::Decode {
            path,
            strictness,
            puzzle,
        } => decode(path.as_deref(), strictness, puzzle.as_deref()),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "sudoku-sat",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Encodes a single puzzle from `path` or stdin.
pub(crate) fn encode_puzzle(
    path: Option<&Path>,
    output: Option<&Path>,
    policy: EncodingPolicy,
) -> Result<()> {
    let text = read_input(path)?;
    let grid: Grid = text.parse()?;
    info!(givens = grid.given_count(), "parsed puzzle");

    let cnf = policy.encode(&grid);
    write_formula(&cnf, output)
}

/// Encodes every puzzle of a collection into `out_dir/<grid_nn>.cnf`.
pub(crate) fn encode_collection(
    path: Option<&Path>,
    out_dir: &Path,
    policy: EncodingPolicy,
) -> Result<()> {
    let text = read_input(path)?;
    let grids = parse_collection(&text)?;
    info!(puzzles = grids.len(), "parsed collection");

    for named in &grids {
        let target = out_dir.join(format!("{}.cnf", named.file_stem()));
        debug!(name = %named.name, target = %target.display(), "encoding");
        write_formula(&policy.encode(&named.grid), Some(&target))?;
    }
    Ok(())
}

/// Walks `dir` and encodes each puzzle file next to itself.
///
/// Stops at the first puzzle that fails to parse.
pub(crate) fn encode_dir(dir: &Path, policy: EncodingPolicy) -> Result<()> {
    let mut encoded = 0usize;

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path
            .extension()
            .is_none_or(|ext| ext != "sudoku" && ext != "txt")
        {
            debug!(path = %file_path.display(), "skipping non-puzzle file");
            continue;
        }

        let grid = parse_sudoku_file(file_path)?;
        let target = PathBuf::from(format!("{}.cnf", file_path.display()));
        write_formula(&policy.encode(&grid), Some(&target))?;
        encoded += 1;
    }

    if encoded == 0 {
        warn!(dir = %dir.display(), "no puzzle files found");
    }
    info!(encoded, "encoded directory");
    Ok(())
}

/// Decodes solver output from `path` or stdin and prints the grid.
pub(crate) fn decode(
    path: Option<&Path>,
    strictness: Strictness,
    puzzle: Option<&Path>,
) -> Result<()> {
    // Read the puzzle first so an unreadable file fails before any output.
    let puzzle = puzzle.map(parse_sudoku_file).transpose()?;
    let text = read_input(path)?;
    let grid = decode_solver_output(&text, strictness)?;

    if let Some(puzzle) = puzzle {
        check_against_puzzle(&grid, &puzzle)?;
    }
    write_text(&grid.to_string())
}
