//! Aggregated results and experiment reports

use serde::{Deserialize, Serialize};

use crate::core::config::ExperimentConfig;
use crate::core::error::{Result, RotationError};
use crate::simulation::state::Totals;

/// Mean outcome of many runs of one policy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub policy: String,
    pub alignment_threshold: f64,
    pub runs: u32,
    pub mean_damage: f64,
    pub mean_basic_strikes: f64,
    pub mean_fast_specials: f64,
    pub mean_slow_specials: f64,
}

impl AggregateResult {
    /// Reduce per-run totals to means
    ///
    /// Sums run in slice order so the same runs always give the same bits.
    pub fn from_runs(policy: String, alignment_threshold: f64, runs: &[Totals]) -> Result<Self> {
        if runs.is_empty() {
            return Err(RotationError::invalid("runs", "must be at least 1"));
        }

        let mut damage = 0.0;
        let mut basic = 0u64;
        let mut fast = 0u64;
        let mut slow = 0u64;
        for totals in runs {
            damage += totals.total_damage;
            basic += u64::from(totals.basic_strikes);
            fast += u64::from(totals.fast_specials);
            slow += u64::from(totals.slow_specials);
        }

        let n = runs.len() as f64;
        Ok(Self {
            policy,
            alignment_threshold,
            runs: runs.len() as u32,
            mean_damage: damage / n,
            mean_basic_strikes: basic as f64 / n,
            mean_fast_specials: fast as f64 / n,
            mean_slow_specials: slow as f64 / n,
        })
    }

    /// Percent change of mean damage relative to `baseline`
    ///
    /// `None` when the baseline dealt no damage.
    pub fn improvement_over(&self, baseline: &AggregateResult) -> Option<f64> {
        if baseline.mean_damage > 0.0 {
            Some((self.mean_damage - baseline.mean_damage) / baseline.mean_damage * 100.0)
        } else {
            None
        }
    }
}

/// One point of the balanced threshold sweep
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalancedEntry {
    pub result: AggregateResult,
    pub vs_fast_percent: Option<f64>,
    pub vs_slow_percent: Option<f64>,
}

/// Baselines plus the balanced sweep for one experiment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub fast_priority: AggregateResult,
    pub slow_priority: AggregateResult,
    pub balanced: Vec<BalancedEntry>,
    /// Index into `balanced` of the highest mean damage (first on ties)
    pub top_index: Option<usize>,
    pub simulation_time_ms: u64,
}

impl ExperimentReport {
    pub fn top(&self) -> Option<&BalancedEntry> {
        self.top_index.and_then(|i| self.balanced.get(i))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} runs per policy, {} balanced thresholds in {}ms\nFast priority: {:.2}, slow priority: {:.2}",
            self.config.runs,
            self.balanced.len(),
            self.simulation_time_ms,
            self.fast_priority.mean_damage,
            self.slow_priority.mean_damage,
        );
        if let Some(top) = self.top() {
            summary.push_str(&format!(
                "\nTop: {} at {:.2}",
                top.result.policy, top.result.mean_damage
            ));
        }
        summary
    }
}

/// Index of the first entry with the highest mean damage
pub fn top_index(entries: &[BalancedEntry]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, entry) in entries.iter().enumerate() {
        let damage = entry.result.mean_damage;
        match best {
            Some((_, best_damage)) if damage <= best_damage => {}
            _ => best = Some((i, damage)),
        }
    }
    best.map(|(i, _)| i)
}
