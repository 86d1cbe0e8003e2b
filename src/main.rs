//! Mahjong Learn - Unified CLI
//!
//! Runs random-play simulations and prints game views.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use mahjong_learn::{
    AppConfig, Cli, Command, GameRegistry, GameView, run_simulations, step_random,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    let config = cli.apply(config.with_env_overrides()?)?;

    match cli.command {
        Command::Simulate { .. } => simulate(&config),
        Command::Inspect { steps } => inspect(&config, steps),
    }
}

/// Plays the configured number of games and prints one line per game.
#[instrument(skip(config))]
fn simulate(config: &AppConfig) -> Result<()> {
    info!(games = config.simulation().games(), "Starting simulation");

    let reports = run_simulations(config.game(), config.simulation())?;
    for (i, report) in reports.iter().enumerate() {
        let outcome = if *report.terminated() {
            "ended"
        } else {
            "unfinished"
        };
        println!(
            "game {}: {} in {} after {} transitions",
            i + 1,
            outcome,
            report.final_state(),
            report.transitions()
        );
    }

    Ok(())
}

/// Advances one fresh game by `steps` random transitions and prints its view.
#[instrument(skip(config))]
fn inspect(config: &AppConfig, steps: usize) -> Result<()> {
    let registry = GameRegistry::new();
    let id = registry.start_new(config.game())?;
    let game = registry.get(id)?;

    let mut rng = match config.game().seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    for _ in 0..steps {
        if game.has_terminated() {
            break;
        }
        step_random(&game, &mut rng)?;
    }

    let view = GameView::of(&game);
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
