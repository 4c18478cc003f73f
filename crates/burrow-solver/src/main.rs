//! CLI entry point for the burrow solver.
//!
//! Usage:
//!   burrow-solver solve <diagram.txt> [options]
//!   burrow-solver solve --stdin [options]
//!
//! Options:
//!   --unfold              Insert the two extra room rows before solving
//!   --timeout <seconds>   Give up after this long (default: no limit)
//!   --check-invariants    Verify amphipod conservation on every move
//!   --json                Print a JSON report instead of a single number
//!   --show-moves          Draw the burrow after each move on stderr
//!
//! Exit codes: 0 solved, 1 unreachable, 2 bad input or IO error, 3 incomplete,
//! 4 internal invariant violation.
//! Set RUST_LOG (e.g. `RUST_LOG=burrow_solver=debug`) for search logging.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use burrow_solver::{
    diagram, solve, Burrow, Energy, Error, Move, Outcome, SolverConfig, SolverResult,
};

#[derive(Parser)]
#[command(name = "burrow-solver")]
#[command(about = "Minimum-energy solver for the amphipod burrow puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the least energy needed to sort a burrow diagram
    Solve {
        /// Path to the diagram file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the diagram from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Insert the two extra room rows below the first one
        #[arg(long)]
        unfold: bool,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Verify amphipod conservation on every generated move
        #[arg(long)]
        check_invariants: bool,

        /// Print a JSON report
        #[arg(long)]
        json: bool,

        /// Draw the burrow after each move of the solution on stderr
        #[arg(long)]
        show_moves: bool,
    },
}

/// JSON report for a solver run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    energy: Option<Energy>,
    states_expanded: usize,
    states_committed: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<Move>>,
}

struct SolveArgs {
    file: Option<PathBuf>,
    stdin: bool,
    unfold: bool,
    timeout: Option<u64>,
    check_invariants: bool,
    json: bool,
    show_moves: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Solve {
            file,
            stdin,
            unfold,
            timeout,
            check_invariants,
            json,
            show_moves,
        } => {
            let args = SolveArgs {
                file,
                stdin,
                unfold,
                timeout,
                check_invariants,
                json,
                show_moves,
            };
            match run_solve(&args) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit_code_for(&e)
                }
            }
        }
    };

    std::process::exit(code);
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Solve(_) => 4,
        Error::Parse(_) | Error::Io(_) | Error::Json(_) | Error::MissingInput => 2,
    }
}

fn read_input(file: Option<&PathBuf>, stdin: bool) -> Result<String, Error> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(fs::read_to_string(path)?)
    } else {
        Err(Error::MissingInput)
    }
}

fn run_solve(args: &SolveArgs) -> Result<i32, Error> {
    let mut text = read_input(args.file.as_ref(), args.stdin)?;
    if args.unfold {
        text = diagram::unfold(&text)?;
    }
    let burrow = diagram::parse(&text)?;

    let config = SolverConfig {
        timeout: args.timeout.map(Duration::from_secs),
        check_invariants: args.check_invariants,
    };
    let result = solve(&burrow, &config)?;

    if args.show_moves {
        if let Outcome::Solved { moves, .. } = &result.outcome {
            draw_moves(&burrow, moves);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&format_result(&result))?);
    } else {
        match result.outcome.energy() {
            Some(energy) => println!("{}", energy),
            None => println!("{}", result.outcome.label()),
        }
    }

    Ok(match result.outcome {
        Outcome::Solved { .. } => 0,
        Outcome::Unreachable => 1,
        Outcome::Incomplete => 3,
    })
}

fn draw_moves(start: &Burrow, moves: &[Move]) {
    let mut burrow = start.clone();
    let mut spent: Energy = 0;
    eprintln!("{}\n", burrow);
    for (i, step) in moves.iter().enumerate() {
        burrow = step.apply(&burrow);
        spent += step.energy;
        eprintln!(
            "Move {}: {} {:?} -> {:?} (+{}, total {})",
            i + 1,
            step.amphipod,
            step.from,
            step.to,
            step.energy,
            spent
        );
        eprintln!("{}\n", burrow);
    }
}

fn format_result(result: &SolverResult) -> SolveOutput {
    let moves = match &result.outcome {
        Outcome::Solved { moves, .. } => Some(moves.clone()),
        _ => None,
    };
    SolveOutput {
        solved: result.outcome.is_solved(),
        outcome: result.outcome.label(),
        energy: result.outcome.energy(),
        states_expanded: result.states_expanded,
        states_committed: result.states_committed,
        time_elapsed_ms: result.time_elapsed_ms,
        moves,
    }
}
