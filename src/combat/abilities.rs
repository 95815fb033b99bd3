//! Ability resolution
//!
//! Turns an action into a damage number. Every ability is a weapon roll
//! scaled and offset by ability-specific constants, then a crit trial on
//! the whole hit. Every resolved use also rolls for the proc haste.

use rand::Rng;

use crate::combat::constants::{
    BASIC_FLAT_BONUS, BASIC_WEAPON_SCALE, FAST_FLAT_BONUS, FAST_WEAPON_SCALE, SLOW_FLAT_BONUS,
    SLOW_WEAPON_SCALE,
};
use crate::combat::damage::roll;
use crate::core::config::EncounterConfig;
use crate::core::types::Action;

/// Weapon scaling of an ability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityFormula {
    pub weapon_scale: f64,
    pub flat_bonus: f64,
}

impl AbilityFormula {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::BasicStrike => Self {
                weapon_scale: BASIC_WEAPON_SCALE,
                flat_bonus: BASIC_FLAT_BONUS,
            },
            Action::FastSpecial => Self {
                weapon_scale: FAST_WEAPON_SCALE,
                flat_bonus: FAST_FLAT_BONUS,
            },
            Action::SlowSpecial => Self {
                weapon_scale: SLOW_WEAPON_SCALE,
                flat_bonus: SLOW_FLAT_BONUS,
            },
        }
    }

    /// Non-crit damage for a given weapon roll
    pub fn apply(&self, weapon_damage: f64) -> f64 {
        weapon_damage * self.weapon_scale + self.flat_bonus
    }
}

/// Result of resolving one ability use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityHit {
    pub action: Action,
    pub damage: f64,
    pub crit: bool,
    /// Whether this use triggered the proc haste
    pub proc_triggered: bool,
}

fn crit_chance(config: &EncounterConfig, action: Action) -> f64 {
    match action {
        Action::BasicStrike => config.basic_crit_chance,
        Action::FastSpecial => config.fast_crit_chance,
        Action::SlowSpecial => config.slow_crit_chance,
    }
}

/// Resolve a single use of `action`
///
/// Draw order is weapon roll, crit trial, proc trial.
pub fn resolve_ability<R: Rng + ?Sized>(
    rng: &mut R,
    config: &EncounterConfig,
    action: Action,
) -> AbilityHit {
    let formula = AbilityFormula::for_action(action);
    let hit = roll(
        rng,
        config.min_damage,
        config.max_damage,
        |weapon| formula.apply(weapon),
        crit_chance(config, action),
        config.crit_multiplier,
    );
    let proc_triggered = rng.gen_bool(config.proc_chance);

    AbilityHit {
        action,
        damage: hit.damage,
        crit: hit.crit,
        proc_triggered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_config(damage: f64, crit: f64) -> EncounterConfig {
        EncounterConfig {
            min_damage: damage,
            max_damage: damage,
            basic_crit_chance: crit,
            fast_crit_chance: crit,
            slow_crit_chance: crit,
            proc_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_damage_formulas() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = flat_config(500.0, 0.0);

        let basic = resolve_ability(&mut rng, &config, Action::BasicStrike);
        let fast = resolve_ability(&mut rng, &config, Action::FastSpecial);
        let slow = resolve_ability(&mut rng, &config, Action::SlowSpecial);

        assert!((basic.damage - 500.0).abs() < 1e-9);
        assert!((fast.damage - 535.0).abs() < 1e-9);
        assert!((slow.damage - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_crit_multiplies_whole_hit() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = flat_config(500.0, 1.0);

        let fast = resolve_ability(&mut rng, &config, Action::FastSpecial);
        assert!(fast.crit);
        assert!((fast.damage - 535.0 * 2.2).abs() < 1e-9);

        let slow = resolve_ability(&mut rng, &config, Action::SlowSpecial);
        assert!((slow.damage - 760.0 * 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_proc_chance_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut config = flat_config(500.0, 0.0);

        config.proc_chance = 0.0;
        assert!((0..200).all(|_| !resolve_ability(&mut rng, &config, Action::BasicStrike).proc_triggered));

        config.proc_chance = 1.0;
        assert!((0..200).all(|_| resolve_ability(&mut rng, &config, Action::SlowSpecial).proc_triggered));
    }
}
