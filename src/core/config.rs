//! Encounter and experiment configuration with documented defaults
//!
//! Every number the simulation depends on lives here so that one TOML file
//! (or the interactive driver) fully describes an experiment. Configs are
//! immutable once validated and are shared read-only by every run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    DEFAULT_TICK_SIZE, FAST_SPECIAL_COOLDOWN, SLOW_SPECIAL_COOLDOWN, SPECIAL_CRIT_BONUS,
};
use crate::core::error::{Result, RotationError};
use crate::core::types::Tick;

/// Slack used when converting seconds to ticks so that values like
/// `4.0 / 0.01 = 400.00000000000006` do not round up an extra tick
const TICK_EPSILON: f64 = 1e-6;

/// Parameters of a single encounter, shared by all runs of a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    // === WEAPON ===
    /// Lower bound of the weapon damage roll (inclusive)
    pub min_damage: f64,

    /// Upper bound of the weapon damage roll (exclusive)
    pub max_damage: f64,

    /// Base seconds between basic strikes before haste
    pub swing_speed: f64,

    // === CRITICAL HITS ===
    /// Crit probability of the basic strike (0.0 to 1.0)
    pub basic_crit_chance: f64,

    /// Crit probability of the fast special
    ///
    /// Defaults to the basic crit chance plus 6 percentage points.
    pub fast_crit_chance: f64,

    /// Crit probability of the slow special
    pub slow_crit_chance: f64,

    /// Damage multiplier applied to a critical hit
    pub crit_multiplier: f64,

    // === ABILITIES ===
    /// Seconds between fast special uses
    pub fast_cooldown: f64,

    /// Seconds between slow special uses
    pub slow_cooldown: f64,

    // === BUFFS ===
    /// Seconds between periodic haste activations
    ///
    /// The first activation happens one full period into the encounter,
    /// so encounters shorter than this never see the buff.
    pub periodic_buff_cooldown: f64,

    /// Seconds the periodic haste stays active
    pub periodic_buff_duration: f64,

    /// Probability that any resolved attack triggers the proc haste
    pub proc_chance: f64,

    /// Seconds the proc haste stays active (refreshes, never stacks)
    pub proc_duration: f64,

    // === TIME ===
    /// Simulated encounter length in seconds
    pub duration: f64,

    /// Seconds advanced per engine step
    ///
    /// Cooldowns and durations are rounded up to whole ticks, so this
    /// should stay well below the shortest timer (the swing interval).
    pub tick_size: f64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        let basic_crit_chance = 0.20;
        Self {
            min_damage: 522.0,
            max_damage: 610.0,
            swing_speed: 3.56,

            basic_crit_chance,
            fast_crit_chance: basic_crit_chance + SPECIAL_CRIT_BONUS,
            slow_crit_chance: basic_crit_chance + SPECIAL_CRIT_BONUS,
            crit_multiplier: 2.2,

            fast_cooldown: FAST_SPECIAL_COOLDOWN,
            slow_cooldown: SLOW_SPECIAL_COOLDOWN,

            periodic_buff_cooldown: 300.0,
            periodic_buff_duration: 15.0,
            proc_chance: 0.10,
            proc_duration: 12.0,

            duration: 180.0,
            tick_size: DEFAULT_TICK_SIZE,
        }
    }
}

impl EncounterConfig {
    /// Set the basic crit chance and derive both special crit chances from it
    pub fn with_basic_crit(mut self, chance: f64) -> Self {
        self.basic_crit_chance = chance;
        self.fast_crit_chance = chance + SPECIAL_CRIT_BONUS;
        self.slow_crit_chance = chance + SPECIAL_CRIT_BONUS;
        self
    }

    /// Whole ticks needed for `seconds` to elapse (rounded up)
    pub fn to_ticks(&self, seconds: f64) -> Tick {
        let ticks = (seconds / self.tick_size - TICK_EPSILON).ceil();
        if ticks > 0.0 {
            ticks as Tick
        } else {
            0
        }
    }

    /// Whole ticks that fit inside `seconds` (rounded down)
    pub fn to_ticks_floor(&self, seconds: f64) -> Tick {
        let ticks = (seconds / self.tick_size + TICK_EPSILON).floor();
        if ticks > 0.0 {
            ticks as Tick
        } else {
            0
        }
    }

    /// Convert a signed tick offset back into seconds
    pub fn to_seconds(&self, ticks: i64) -> f64 {
        ticks as f64 * self.tick_size
    }

    /// Number of ticks one encounter runs for
    pub fn total_ticks(&self) -> Tick {
        self.to_ticks(self.duration)
    }

    /// Validate configuration before any simulation executes
    pub fn validate(&self) -> Result<()> {
        check_non_negative("min_damage", self.min_damage)?;
        check_non_negative("max_damage", self.max_damage)?;
        if self.max_damage < self.min_damage {
            return Err(RotationError::invalid(
                "max_damage",
                format!(
                    "must be >= min_damage ({} < {})",
                    self.max_damage, self.min_damage
                ),
            ));
        }

        check_positive("swing_speed", self.swing_speed)?;
        check_probability("basic_crit_chance", self.basic_crit_chance)?;
        check_probability("fast_crit_chance", self.fast_crit_chance)?;
        check_probability("slow_crit_chance", self.slow_crit_chance)?;
        check_positive("crit_multiplier", self.crit_multiplier)?;

        check_positive("fast_cooldown", self.fast_cooldown)?;
        check_positive("slow_cooldown", self.slow_cooldown)?;

        check_positive("periodic_buff_cooldown", self.periodic_buff_cooldown)?;
        check_non_negative("periodic_buff_duration", self.periodic_buff_duration)?;
        check_probability("proc_chance", self.proc_chance)?;
        check_non_negative("proc_duration", self.proc_duration)?;

        check_positive("duration", self.duration)?;
        check_positive("tick_size", self.tick_size)?;
        if self.tick_size > self.swing_speed {
            return Err(RotationError::invalid(
                "tick_size",
                format!(
                    "must not exceed swing_speed ({} > {})",
                    self.tick_size, self.swing_speed
                ),
            ));
        }

        Ok(())
    }
}

/// A full experiment: one encounter definition evaluated under several policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub encounter: EncounterConfig,

    /// Simulations averaged per policy
    pub runs: u32,

    /// Base seed; run `i` of every aggregation uses `seed + i`
    ///
    /// Every policy sees the same seed sequence so comparisons are paired.
    pub seed: u64,

    /// Spacing of the balanced-policy threshold sweep in seconds
    pub sweep_step: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            encounter: EncounterConfig::default(),
            runs: 100,
            seed: 12345,
            sweep_step: 0.1,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        self.encounter.validate()?;
        if self.runs == 0 {
            return Err(RotationError::invalid("runs", "must be at least 1"));
        }
        check_positive("sweep_step", self.sweep_step)?;
        // Finer steps only repeat thresholds that snap to the same tick
        if self.sweep_step < self.encounter.tick_size {
            return Err(RotationError::invalid(
                "sweep_step",
                format!(
                    "must be at least tick_size ({} < {})",
                    self.sweep_step, self.encounter.tick_size
                ),
            ));
        }
        Ok(())
    }
}

/// Load an experiment from a TOML file; absent keys keep their defaults
pub fn load_config(path: impl AsRef<Path>) -> Result<ExperimentConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: ExperimentConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

// `!(value > 0.0)` style checks also reject NaN

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(RotationError::invalid(
            field,
            format!("must be positive (got {})", value),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(RotationError::invalid(
            field,
            format!("must be non-negative (got {})", value),
        ));
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(RotationError::invalid(
            field,
            format!("must be within [0, 1] (got {})", value),
        ));
    }
    Ok(())
}
