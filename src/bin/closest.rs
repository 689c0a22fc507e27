use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use closest_planet::analysis::Report;
use closest_planet::config::{Mode, SimulationConfig};
use closest_planet::file::read_config;
use closest_planet::simulation::Simulation;

/// Which planet is, on average, closest to each of the others?
#[derive(Debug, Parser)]
struct Args {
    /// JSON config file. Defaults to Mercury through Mars.
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Simulated time span, in days
    #[arg(long)]
    horizon: Option<f64>,

    /// Number of grid steps or random samples
    #[arg(long)]
    samples: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Split the horizon across this many chunks on the thread pool.
    /// 1 runs everything on the main thread.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::inner_planets(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(samples) = args.samples {
        config.step_or_sample_count = samples;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let simulation = Simulation::from_config(&config).context("invalid simulation config")?;
    let report = if args.threads > 1 {
        simulation.run_parallel(args.threads)
    } else {
        simulation.run()
    }
    .context("simulation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    Ok(())
}

fn print_table(report: &Report) {
    for planet in &report.planets {
        println!("{} (closest: {})", planet.name, planet.closest);
        for (name, stats) in &planet.neighbors {
            let nearest = match stats.nearest_fraction {
                Some(fraction) => format!("{:>3.0}%", fraction * 100.0),
                None => "   -".to_owned(),
            };
            println!(
                "  {:<10}{:>8.4} AU  {}",
                name, stats.mean_distance, nearest
            );
        }
        println!();
    }
}
