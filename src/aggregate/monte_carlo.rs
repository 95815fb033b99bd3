//! Monte Carlo aggregation
//!
//! Runs one policy many times and averages the totals. Runs are spread over
//! rayon's pool; each gets its own `ChaCha8Rng` seeded from the base seed
//! plus the run index, so nothing is shared between runs and the result does
//! not depend on scheduling.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::aggregate::output::AggregateResult;
use crate::core::config::EncounterConfig;
use crate::core::error::{Result, RotationError};
use crate::simulation::engine::Engine;
use crate::simulation::policy::RotationPolicy;
use crate::simulation::state::Totals;

/// Random stream for run `run` of an aggregation seeded with `seed`
pub fn run_rng(seed: u64, run: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run)))
}

/// Simulate `runs` encounters of `policy` and average them
pub fn aggregate<P: RotationPolicy + ?Sized>(
    policy: &P,
    config: &EncounterConfig,
    runs: u32,
    seed: u64,
) -> Result<AggregateResult> {
    if runs == 0 {
        return Err(RotationError::invalid("runs", "must be at least 1"));
    }
    let engine = Engine::new(config, policy)?;
    let name = policy.name();
    let start = Instant::now();

    // collect() keeps run order, the reduction below is sequential
    let totals: Vec<Totals> = (0..runs)
        .into_par_iter()
        .map(|run| {
            let mut rng = run_rng(seed, run);
            let state = engine.run(&mut rng);
            tracing::debug!(
                "{} run {}: {:.1} damage ({} basic, {} fast, {} slow)",
                name,
                run,
                state.totals.total_damage,
                state.totals.basic_strikes,
                state.totals.fast_specials,
                state.totals.slow_specials
            );
            state.totals
        })
        .collect();

    let result = AggregateResult::from_runs(
        name.clone(),
        policy.alignment_threshold(config),
        &totals,
    )?;

    tracing::info!(
        "Simulated {}: {} runs in {:.1}ms, mean damage {:.2}",
        name,
        runs,
        start.elapsed().as_secs_f64() * 1000.0,
        result.mean_damage
    );

    Ok(result)
}
