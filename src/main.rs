//! Rotation Sim - Entry Point
//!
//! Builds an experiment from defaults, an optional TOML file, command line
//! overrides and (optionally) interactive prompts, then compares the
//! fast-priority, slow-priority and balanced policies.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rotation_sim::aggregate::run_experiment;
use rotation_sim::core::{load_config, ExperimentConfig, Result};
use rotation_sim::ui::{render_report, Painter, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Rotation Analyzer - compare melee ability priorities by simulation
#[derive(Parser, Debug)]
#[command(name = "rotation-sim")]
#[command(about = "Estimate mean encounter damage of rotation policies by Monte Carlo simulation")]
struct Args {
    /// Experiment TOML file (missing keys use defaults)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Prompt for weapon, crit, duration and run count on stdin
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Weapon minimum damage
    #[arg(long)]
    min_damage: Option<f64>,

    /// Weapon maximum damage
    #[arg(long)]
    max_damage: Option<f64>,

    /// Base swing interval in seconds
    #[arg(long)]
    swing_speed: Option<f64>,

    /// Basic crit chance in percent (specials get +6)
    #[arg(long)]
    crit: Option<f64>,

    /// Encounter length in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Runs averaged per policy
    #[arg(long, short = 'n')]
    runs: Option<u32>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Threshold sweep step in seconds
    #[arg(long)]
    sweep_step: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn apply(&self, config: &mut ExperimentConfig) {
        let encounter = &mut config.encounter;
        if let Some(v) = self.min_damage {
            encounter.min_damage = v;
        }
        if let Some(v) = self.max_damage {
            encounter.max_damage = v;
        }
        if let Some(v) = self.swing_speed {
            encounter.swing_speed = v;
        }
        if let Some(v) = self.crit {
            *encounter = encounter.clone().with_basic_crit(v / 100.0);
        }
        if let Some(v) = self.duration {
            encounter.duration = v;
        }
        if let Some(v) = self.runs {
            config.runs = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.sweep_step {
            config.sweep_step = v;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rotation_sim=info".to_string()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading experiment from {:?}", path);
            load_config(path)?
        }
        None => ExperimentConfig::default(),
    };
    args.apply(&mut config);

    if args.interactive {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        config = prompter.ask_experiment(&config)?;
    }

    let report = run_experiment(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
        OutputFormat::Text => render_report(&mut out, &report, Painter { color: !args.no_color })?,
    }

    Ok(())
}
