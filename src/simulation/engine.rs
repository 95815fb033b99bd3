//! Fixed-step encounter engine
//!
//! One call to [`Engine::run`] simulates a full encounter. Each tick:
//! 1. Pick the swing interval from active haste (periodic beats proc)
//! 2. Buff expiry (implicit: buffs hold an absolute expiry tick)
//! 3. Ask the policy for an action
//! 4. Resolve it if the engine-side precondition also holds
//! 5. Advance the tick counter
//! 6. Start the periodic haste when its next scheduled tick is reached
//!
//! All durations are converted to whole ticks once, up front.

use rand::Rng;

use crate::combat::abilities::resolve_ability;
use crate::combat::constants::{PERIODIC_HASTE_FACTOR, PROC_HASTE_FACTOR};
use crate::core::config::EncounterConfig;
use crate::core::error::Result;
use crate::core::types::{Action, Buff, Tick};
use crate::simulation::events::{CombatEventType, CombatLog};
use crate::simulation::policy::{validate_threshold, RotationPolicy};
use crate::simulation::state::EncounterState;

/// Config durations expressed in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub total: Tick,
    pub swing_base: Tick,
    pub swing_proc: Tick,
    pub swing_periodic: Tick,
    pub fast_cooldown: Tick,
    pub slow_cooldown: Tick,
    pub proc_duration: Tick,
    pub periodic_duration: Tick,
    pub periodic_period: Tick,
    pub alignment: Tick,
}

impl TickSchedule {
    pub fn new(config: &EncounterConfig, alignment_threshold: f64) -> Self {
        Self {
            total: config.total_ticks(),
            swing_base: config.to_ticks(config.swing_speed),
            swing_proc: config.to_ticks(config.swing_speed * PROC_HASTE_FACTOR),
            swing_periodic: config.to_ticks(config.swing_speed * PERIODIC_HASTE_FACTOR),
            fast_cooldown: config.to_ticks(config.fast_cooldown),
            slow_cooldown: config.to_ticks(config.slow_cooldown),
            proc_duration: config.to_ticks(config.proc_duration),
            periodic_duration: config.to_ticks(config.periodic_buff_duration),
            periodic_period: config.to_ticks(config.periodic_buff_cooldown).max(1),
            alignment: config.to_ticks_floor(alignment_threshold),
        }
    }
}

/// Runs encounters for one (config, policy) pair
pub struct Engine<'a, P: RotationPolicy + ?Sized> {
    config: &'a EncounterConfig,
    policy: &'a P,
    schedule: TickSchedule,
    /// Threshold snapped to the tick grid, as handed to the policy
    alignment_threshold: f64,
}

impl<'a, P: RotationPolicy + ?Sized> Engine<'a, P> {
    /// Validate the config and the policy's threshold, then precompute ticks
    pub fn new(config: &'a EncounterConfig, policy: &'a P) -> Result<Self> {
        config.validate()?;
        let threshold = validate_threshold(policy.alignment_threshold(config))?;

        let schedule = TickSchedule::new(config, threshold);
        let alignment_threshold = config.to_seconds(schedule.alignment as i64);

        Ok(Self {
            config,
            policy,
            schedule,
            alignment_threshold,
        })
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Simulate one encounter and return its final state
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> EncounterState {
        let mut state = EncounterState::new(self.schedule.periodic_period);
        while state.tick < self.schedule.total {
            self.step(&mut state, rng, None);
        }
        state
    }

    /// Like [`Engine::run`] but records every hit and buff activation
    pub fn run_traced<R: Rng + ?Sized>(&self, rng: &mut R) -> (EncounterState, CombatLog) {
        let mut state = EncounterState::new(self.schedule.periodic_period);
        let mut log = CombatLog::new();
        while state.tick < self.schedule.total {
            self.step(&mut state, rng, Some(&mut log));
        }
        (state, log)
    }

    fn swing_interval(&self, state: &EncounterState) -> Tick {
        if state.is_active(Buff::Periodic) {
            self.schedule.swing_periodic
        } else if state.is_active(Buff::Proc) {
            self.schedule.swing_proc
        } else {
            self.schedule.swing_base
        }
    }

    /// Advance `state` by exactly one tick
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &mut EncounterState,
        rng: &mut R,
        mut log: Option<&mut CombatLog>,
    ) {
        let now = state.tick;
        let swing_interval = self.swing_interval(state);

        let timers = state.timers(self.config);
        let choice = self.policy.decide(&timers, self.alignment_threshold);

        if let Some(action) = choice.filter(|a| state.can_use(*a, self.schedule.alignment)) {
            let hit = resolve_ability(rng, self.config, action);
            state.totals.record(&hit);

            match action {
                Action::BasicStrike => {}
                Action::FastSpecial => state.fast_ready = now + self.schedule.fast_cooldown,
                Action::SlowSpecial => state.slow_ready = now + self.schedule.slow_cooldown,
            }
            if action.resets_swing() {
                state.swing_ready = now + swing_interval;
            }

            let time = self.config.to_seconds(now as i64);
            if let Some(log) = log.as_deref_mut() {
                log.push(
                    CombatEventType::Hit {
                        action,
                        damage: hit.damage,
                        crit: hit.crit,
                    },
                    now,
                    time,
                );
            }

            if hit.proc_triggered {
                // Refresh, never stack; active from the next tick on
                state.proc_expires = now + 1 + self.schedule.proc_duration;
                if let Some(log) = log.as_deref_mut() {
                    log.push(
                        CombatEventType::BuffApplied {
                            buff: Buff::Proc,
                            expires_tick: state.proc_expires,
                        },
                        now,
                        time,
                    );
                }
            }
        }

        state.tick += 1;

        if state.tick >= state.next_periodic {
            state.periodic_expires = state.tick + self.schedule.periodic_duration;
            state.next_periodic += self.schedule.periodic_period;
            if let Some(log) = log.as_deref_mut() {
                log.push(
                    CombatEventType::BuffApplied {
                        buff: Buff::Periodic,
                        expires_tick: state.periodic_expires,
                    },
                    state.tick,
                    state.elapsed(self.config),
                );
            }
        }
    }
}
