//! Circuit Puzzle Solver
//!
//! Solves one level of the 8x4 circuit-building puzzle and prints the board
//! as text. With a frame rate the search redraws after every accepted
//! placement; unbounded runs go straight to the verdict.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;

use spaghetti::board::Board;
use spaghetti::levels::{self, FIRST_LEVEL, LAST_LEVEL};
use spaghetti::solver::{SolveOutcome, Solver};

/// Solves a level of the circuit-building puzzle.
#[derive(Parser)]
#[command(name = "spaghetti")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Level number to solve (49 to 120).
    #[arg(long)]
    level: u32,

    /// Redraw cadence in boards per second while searching; 0 runs unbounded
    /// and skips the slow pathfinding check.
    #[arg(long, default_value_t = 0)]
    fps: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(hints) = levels::level_hints(cli.level) else {
        eprintln!(
            "level {} is out of range ({FIRST_LEVEL} to {LAST_LEVEL})",
            cli.level
        );
        return ExitCode::from(2);
    };

    let board = match Board::new(&hints) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("level {} has invalid hint data: {error}", cli.level);
            return ExitCode::from(2);
        }
    };

    let slow_checks_enabled = cli.fps != 0;
    let mut solver = Solver::new(board, slow_checks_enabled);

    let outcome = if cli.fps == 0 {
        solver.solve()
    } else {
        let frame = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
        solver.solve_with(|board| {
            println!("{}", board.format_board());
            thread::sleep(frame);
            true
        })
    };

    let stats = solver.stats();
    match outcome {
        SolveOutcome::Solved => {
            println!("Solution found!");
            print!("{}", solver.board().format_board());
            println!(
                "{} valid boards across {} combinations",
                stats.valid_boards, stats.combinations_tried
            );
            ExitCode::SUCCESS
        }
        SolveOutcome::NoSolution | SolveOutcome::Aborted => {
            println!("No solution found...");
            println!(
                "{} valid boards across {} combinations",
                stats.valid_boards, stats.combinations_tried
            );
            ExitCode::from(1)
        }
    }
}
