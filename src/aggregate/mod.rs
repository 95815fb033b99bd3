//! Monte Carlo aggregation and policy comparison
//!
//! Repeats encounters per policy, reduces them to means and compares the
//! balanced threshold sweep against both priority baselines.

pub mod experiment;
pub mod monte_carlo;
pub mod output;

pub use experiment::{run_experiment, sweep_thresholds};
pub use monte_carlo::{aggregate, run_rng};
pub use output::{AggregateResult, BalancedEntry, ExperimentReport};
