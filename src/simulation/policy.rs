//! Decision policies
//!
//! A policy looks at the swing timer, both special cooldowns and the
//! alignment threshold and picks at most one action per tick. Policies are
//! stateless and shared by every run of an aggregation, so they must be
//! `Send + Sync`. The engine only depends on [`RotationPolicy`]; adding a
//! policy never touches the engine.

use crate::core::config::EncounterConfig;
use crate::core::error::{Result, RotationError};
use crate::core::types::Action;
use crate::simulation::state::TimerView;

/// Strategy consulted by the engine once per tick
pub trait RotationPolicy: Send + Sync {
    /// Display name used in reports and logs
    fn name(&self) -> String;

    /// Alignment threshold (seconds) this policy runs with under `config`
    ///
    /// The engine enforces it too: a slow special only lands when the next
    /// swing is at most this far away.
    fn alignment_threshold(&self, config: &EncounterConfig) -> f64;

    /// Pick an action, or `None` to wait this tick
    fn decide(&self, timers: &TimerView, alignment_threshold: f64) -> Option<Action>;
}

/// The general rotation rule shared by all built-in policies
///
/// 1. Slow special when off cooldown and the next swing is within the threshold
/// 2. Fast special when off cooldown and either the swing is further away
///    than the threshold or the slow special is still cooling down
/// 3. Basic strike when the swing timer is up
pub fn balanced_decision(timers: &TimerView, alignment_threshold: f64) -> Option<Action> {
    let slow_ready = timers.slow_cooldown <= 0.0;
    let fast_ready = timers.fast_cooldown <= 0.0;

    if slow_ready && timers.swing <= alignment_threshold {
        Some(Action::SlowSpecial)
    } else if fast_ready && (timers.swing > alignment_threshold || !slow_ready) {
        Some(Action::FastSpecial)
    } else if timers.swing <= 0.0 {
        Some(Action::BasicStrike)
    } else {
        None
    }
}

/// Reject negative, infinite or NaN alignment thresholds
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if !(threshold >= 0.0) || !threshold.is_finite() {
        return Err(RotationError::invalid(
            "alignment_threshold",
            format!("must be a non-negative number of seconds (got {})", threshold),
        ));
    }
    Ok(threshold)
}

/// Use the fast special whenever it is up
///
/// Threshold 0: the slow special only goes out when a swing is already due.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastPriority;

impl RotationPolicy for FastPriority {
    fn name(&self) -> String {
        "Fast Priority".to_string()
    }

    fn alignment_threshold(&self, _config: &EncounterConfig) -> f64 {
        0.0
    }

    fn decide(&self, timers: &TimerView, alignment_threshold: f64) -> Option<Action> {
        balanced_decision(timers, alignment_threshold)
    }
}

/// Favour the slow special at almost any point of the swing
///
/// Threshold is one tick short of the base swing interval, leaving the fast
/// special only the sliver right after a swing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlowPriority;

impl RotationPolicy for SlowPriority {
    fn name(&self) -> String {
        "Slow Priority".to_string()
    }

    fn alignment_threshold(&self, config: &EncounterConfig) -> f64 {
        (config.swing_speed - config.tick_size).max(0.0)
    }

    fn decide(&self, timers: &TimerView, alignment_threshold: f64) -> Option<Action> {
        balanced_decision(timers, alignment_threshold)
    }
}

/// Hold the fast special when a slow special can be lined up with the
/// next swing at most `threshold` seconds away
#[derive(Debug, Clone, Copy)]
pub struct Balanced {
    threshold: f64,
}

impl Balanced {
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl RotationPolicy for Balanced {
    fn name(&self) -> String {
        format!("Balanced Priority (Threshold {:.1}s)", self.threshold)
    }

    fn alignment_threshold(&self, _config: &EncounterConfig) -> f64 {
        self.threshold
    }

    fn decide(&self, timers: &TimerView, alignment_threshold: f64) -> Option<Action> {
        balanced_decision(timers, alignment_threshold)
    }
}
