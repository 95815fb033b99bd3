//! Per-encounter mutable state
//!
//! Timers are stored as absolute ticks ("ready at" / "expires at") rather
//! than counted down, so a three-minute encounter accumulates no float
//! drift. Remaining time in seconds is derived on demand for policies.

use serde::{Deserialize, Serialize};

use crate::combat::abilities::AbilityHit;
use crate::core::config::EncounterConfig;
use crate::core::types::{Action, Buff, Tick};

/// Running damage and usage totals for one encounter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_damage: f64,
    pub basic_strikes: u32,
    pub fast_specials: u32,
    pub slow_specials: u32,
}

impl Totals {
    pub fn record(&mut self, hit: &AbilityHit) {
        self.total_damage += hit.damage;
        match hit.action {
            Action::BasicStrike => self.basic_strikes += 1,
            Action::FastSpecial => self.fast_specials += 1,
            Action::SlowSpecial => self.slow_specials += 1,
        }
    }

    pub fn count(&self, action: Action) -> u32 {
        match action {
            Action::BasicStrike => self.basic_strikes,
            Action::FastSpecial => self.fast_specials,
            Action::SlowSpecial => self.slow_specials,
        }
    }
}

/// Seconds remaining on each timer a policy may inspect
///
/// Values at or below zero mean "ready"; they go negative while an
/// ability sits unused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerView {
    pub swing: f64,
    pub fast_cooldown: f64,
    pub slow_cooldown: f64,
}

/// Mutable state of one encounter, owned by the engine running it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterState {
    /// Ticks processed so far
    pub tick: Tick,
    /// Tick at which the next basic strike becomes available
    pub swing_ready: Tick,
    pub fast_ready: Tick,
    pub slow_ready: Tick,
    /// First tick at which the periodic haste is no longer active
    pub periodic_expires: Tick,
    pub proc_expires: Tick,
    /// Tick of the next scheduled periodic haste activation
    pub next_periodic: Tick,
    pub totals: Totals,
}

impl EncounterState {
    pub fn new(first_periodic: Tick) -> Self {
        Self {
            next_periodic: first_periodic,
            ..Default::default()
        }
    }

    pub fn elapsed(&self, config: &EncounterConfig) -> f64 {
        config.to_seconds(self.tick as i64)
    }

    pub fn is_active(&self, buff: Buff) -> bool {
        match buff {
            Buff::Periodic => self.tick < self.periodic_expires,
            Buff::Proc => self.tick < self.proc_expires,
        }
    }

    /// Signed ticks until `ready_at`, negative once it has passed
    fn remaining(&self, ready_at: Tick) -> i64 {
        ready_at as i64 - self.tick as i64
    }

    pub fn swing_remaining(&self) -> i64 {
        self.remaining(self.swing_ready)
    }

    pub fn cooldown_remaining(&self, action: Action) -> i64 {
        match action {
            Action::BasicStrike => self.swing_remaining(),
            Action::FastSpecial => self.remaining(self.fast_ready),
            Action::SlowSpecial => self.remaining(self.slow_ready),
        }
    }

    pub fn timers(&self, config: &EncounterConfig) -> TimerView {
        TimerView {
            swing: config.to_seconds(self.swing_remaining()),
            fast_cooldown: config.to_seconds(self.cooldown_remaining(Action::FastSpecial)),
            slow_cooldown: config.to_seconds(self.cooldown_remaining(Action::SlowSpecial)),
        }
    }

    /// Engine-side eligibility, checked independently of the policy
    ///
    /// The slow special additionally requires the next swing to be at most
    /// `alignment_ticks` away.
    pub fn can_use(&self, action: Action, alignment_ticks: Tick) -> bool {
        let off_cooldown = self.cooldown_remaining(action) <= 0;
        match action {
            Action::SlowSpecial => off_cooldown && self.swing_remaining() <= alignment_ticks as i64,
            _ => off_cooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_has_everything_ready() {
        let state = EncounterState::new(30_000);
        assert!(state.can_use(Action::BasicStrike, 0));
        assert!(state.can_use(Action::FastSpecial, 0));
        assert!(state.can_use(Action::SlowSpecial, 0));
        assert!(!state.is_active(Buff::Periodic));
        assert!(!state.is_active(Buff::Proc));
    }

    #[test]
    fn test_slow_special_waits_for_alignment() {
        let state = EncounterState {
            tick: 100,
            swing_ready: 150,
            ..Default::default()
        };
        assert!(!state.can_use(Action::SlowSpecial, 49));
        assert!(state.can_use(Action::SlowSpecial, 50));
        assert!(!state.can_use(Action::BasicStrike, 50));
    }

    #[test]
    fn test_timer_view_goes_negative() {
        let config = EncounterConfig::default();
        let state = EncounterState {
            tick: 250,
            swing_ready: 200,
            fast_ready: 300,
            ..Default::default()
        };
        let timers = state.timers(&config);
        assert!((timers.swing + 0.5).abs() < 1e-9);
        assert!((timers.fast_cooldown - 0.5).abs() < 1e-9);
        assert!((timers.slow_cooldown + 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_totals_record_counts_by_action() {
        let mut totals = Totals::default();
        for action in Action::ALL {
            totals.record(&AbilityHit {
                action,
                damage: 100.0,
                crit: false,
                proc_triggered: false,
            });
        }
        assert_eq!(totals.total_damage, 300.0);
        for action in Action::ALL {
            assert_eq!(totals.count(action), 1);
        }
    }
}
