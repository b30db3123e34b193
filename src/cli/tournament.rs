//! Tournament command implementation.

use super::output::{format_tournament_csv, format_tournament_text, JsonTournamentResult};
use super::{load_config, load_scripts, seed_or_random, CliError, TournamentFormat};
use indicatif::{ProgressBar, ProgressStyle};
use skirmish::tournament::run_tournament_with;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments of the tournament command.
#[derive(Debug)]
pub(crate) struct TournamentArgs {
    pub(crate) scripts: Vec<PathBuf>,
    pub(crate) games: u64,
    pub(crate) seed: Option<u64>,
    pub(crate) threads: Option<usize>,
    pub(crate) max_turns: Option<u32>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) format: TournamentFormat,
    pub(crate) progress: bool,
}

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if a script or the config cannot be loaded, or the player
/// count is out of range.
pub(crate) fn execute(args: &TournamentArgs) -> Result<(), CliError> {
    let (scripts, names) = load_scripts(&args.scripts)?;
    let config = load_config(args.config.as_deref(), args.max_turns)?;

    // Set thread pool size if specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_random(args.seed);

    let pb = if args.progress {
        let pb = ProgressBar::new(args.games);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
            )
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_tournament_with(base_seed, args.games, &scripts, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match args.format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &names));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} games/sec, seeds {}..{})",
                duration.as_secs_f64(),
                games_per_sec,
                base_seed,
                base_seed.wrapping_add(args.games)
            );
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, &names, base_seed);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &names));
        }
    }

    Ok(())
}
