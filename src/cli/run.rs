//! Run command implementation.

use super::output::format_text;
use super::{load_config, load_scripts, seed_or_random, CliError, OutputFormat};
use skirmish::tournament::run_game;
use std::path::{Path, PathBuf};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if a script or the config cannot be loaded, or the game
/// cannot be set up.
pub(crate) fn execute(
    scripts: &[PathBuf],
    seed: Option<u64>,
    turns: Option<u32>,
    config: Option<&Path>,
    format: OutputFormat,
    board: bool,
) -> Result<(), CliError> {
    let (scripts, names) = load_scripts(scripts)?;
    let config = load_config(config, turns)?;
    let seed = seed_or_random(seed);

    let result = run_game(seed, &scripts, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, &names));
            if board {
                println!();
                println!("{}", result.final_board);
            }
        }
        OutputFormat::Json => {
            // The final board is always part of the JSON result.
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
