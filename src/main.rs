//! Skirmish CLI - Command-line interface for running scripted battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Skirmish - A turn-based battle simulator for scripted units
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter used when RUST_LOG is unset (e.g. warn, info, skirmish=debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single game between scripts
    Run {
        /// Script files, one per player (2-8 required)
        #[arg(required = true, num_args = 2..=8)]
        scripts: Vec<PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: from config, 10000)
        #[arg(short, long)]
        turns: Option<u32>,

        /// JSON game configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Print the final board
        #[arg(short, long)]
        board: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Script files, one per player (2-8 required)
        #[arg(required = true, num_args = 2..=8)]
        scripts: Vec<PathBuf>,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per game (default: from config, 10000)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// JSON game configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Parse and validate a script
    Validate {
        /// Script file to validate
        #[arg(required = true)]
        script: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    skirmish::logging::init(&args.log_level);

    let result = match args.command {
        Commands::Run {
            scripts,
            seed,
            turns,
            config,
            format,
            board,
        } => cli::run::execute(&scripts, seed, turns, config.as_deref(), format, board),

        Commands::Tournament {
            scripts,
            games,
            seed,
            threads,
            max_turns,
            config,
            format,
            progress,
        } => cli::tournament::execute(&cli::tournament::TournamentArgs {
            scripts,
            games,
            seed,
            threads,
            max_turns,
            config,
            format,
            progress,
        }),

        Commands::Validate { script } => cli::validate::execute(&script),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
