//! Policy comparison experiment
//!
//! Aggregates both priority baselines, then sweeps the balanced policy's
//! alignment threshold across the swing interval and compares every point
//! against the baselines. All aggregations share the base seed.

use std::time::Instant;

use crate::aggregate::monte_carlo::aggregate;
use crate::aggregate::output::{top_index, BalancedEntry, ExperimentReport};
use crate::core::config::ExperimentConfig;
use crate::core::error::Result;
use crate::simulation::policy::{Balanced, FastPriority, SlowPriority};

/// Thresholds `step, 2*step, ...` strictly below `swing_speed`
pub fn sweep_thresholds(swing_speed: f64, step: f64) -> Vec<f64> {
    // Multiplying instead of accumulating keeps 0.1-steps on the decimal grid
    let mut thresholds = Vec::new();
    let mut k = 1u32;
    loop {
        let threshold = f64::from(k) * step;
        if threshold >= swing_speed - 1e-9 {
            break;
        }
        thresholds.push(threshold);
        k += 1;
    }
    thresholds
}

pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;
    let start = Instant::now();
    let encounter = &config.encounter;

    let fast_priority = aggregate(&FastPriority, encounter, config.runs, config.seed)?;
    let slow_priority = aggregate(&SlowPriority, encounter, config.runs, config.seed)?;

    let thresholds = sweep_thresholds(encounter.swing_speed, config.sweep_step);
    tracing::info!(
        "Sweeping {} balanced thresholds ({:.2}s step)",
        thresholds.len(),
        config.sweep_step
    );

    let mut balanced = Vec::with_capacity(thresholds.len());
    for threshold in thresholds {
        let policy = Balanced::new(threshold)?;
        let result = aggregate(&policy, encounter, config.runs, config.seed)?;
        balanced.push(BalancedEntry {
            vs_fast_percent: result.improvement_over(&fast_priority),
            vs_slow_percent: result.improvement_over(&slow_priority),
            result,
        });
    }

    let top_index = top_index(&balanced);
    let report = ExperimentReport {
        config: config.clone(),
        fast_priority,
        slow_priority,
        balanced,
        top_index,
        simulation_time_ms: start.elapsed().as_millis() as u64,
    };

    tracing::info!("{}", report.summary());
    Ok(report)
}
