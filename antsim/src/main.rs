use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use antsim::simulation::Environment;
use antsim::SimulationConfig;
use shared::{AntState, FrameSource};

/// Command-line arguments for the headless colony driver.
#[derive(Parser)]
#[command(name = "antsim", version, about = "Stigmergic ant foraging simulation")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Simulated seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for the random source, overriding the config file.
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Loads the simulation configuration from a TOML file or uses defaults.
fn load_config(path: Option<PathBuf>) -> Result<SimulationConfig> {
    match path {
        Some(path) => {
            let config = SimulationConfig::load(&path)?;
            info!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        None => {
            info!("No config file provided, using defaults");
            Ok(SimulationConfig::default())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut env = Environment::from_config(&config)?;
    for _ in 0..cli.ticks {
        env.advance(cli.dt);
    }

    let food_left: Vec<u32> = env.food_sources().iter().map(|f| f.amount_left).collect();
    info!(
        ticks = env.tick,
        population = env.ants().len(),
        searching = env.count_in_state(AntState::Searching),
        returning = env.count_in_state(AntState::Returning),
        home_trail = env.home_trail.total(),
        food_trail = env.food_trail.total(),
        food_left = ?food_left,
        "Simulation finished"
    );
    Ok(())
}
