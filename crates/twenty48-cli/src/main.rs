mod config;
mod game;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Path to a TOML configuration file (spawn weights)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the tile RNG; omit for an entropy-seeded game
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &cli.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    debug!("spawn weights: {:?}", config.spawn);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    game::run(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut rng,
        config.spawn_weights(),
    )
}
