//! Single Encounter Trace
//!
//! Runs one encounter with a chosen policy and seed and prints every hit
//! and buff activation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rotation_sim::aggregate::run_rng;
use rotation_sim::core::{load_config, ExperimentConfig, Result};
use rotation_sim::simulation::{Balanced, Engine, FastPriority, RotationPolicy, SlowPriority};
use rotation_sim::ui::{render_log, Painter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyChoice {
    Fast,
    Slow,
    Balanced,
}

/// Trace one encounter tick by tick
#[derive(Parser, Debug)]
#[command(name = "encounter-trace")]
#[command(about = "Print the combat log of a single simulated encounter")]
struct Args {
    /// Experiment TOML file (only the encounter section is used)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Decision policy
    #[arg(long, value_enum, default_value_t = PolicyChoice::Balanced)]
    policy: PolicyChoice,

    /// Alignment threshold for the balanced policy in seconds
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Random seed (defaults to the experiment seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the log as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rotation_sim=info".to_string()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let experiment = match &args.config {
        Some(path) => load_config(path)?,
        None => ExperimentConfig::default(),
    };
    let config = experiment.encounter;
    let seed = args.seed.unwrap_or(experiment.seed);

    let policy: Box<dyn RotationPolicy> = match args.policy {
        PolicyChoice::Fast => Box::new(FastPriority),
        PolicyChoice::Slow => Box::new(SlowPriority),
        PolicyChoice::Balanced => Box::new(Balanced::new(args.threshold)?),
    };

    let engine = Engine::new(&config, policy.as_ref())?;
    let (state, log) = engine.run_traced(&mut run_rng(seed, 0));

    tracing::info!(
        "{} with seed {}: {:.2} damage over {:.2}s",
        policy.name(),
        seed,
        state.totals.total_damage,
        state.elapsed(&config)
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", log.to_json()?)?;
    } else {
        render_log(&mut out, &log, Painter { color: !args.no_color })?;
        writeln!(out)?;
        writeln!(
            out,
            "Total: {:.2} damage | {} basic | {} fast | {} slow",
            state.totals.total_damage,
            state.totals.basic_strikes,
            state.totals.fast_specials,
            state.totals.slow_specials
        )?;
    }

    Ok(())
}
