//! Damage rolls
//!
//! Stateless sampling of weapon damage and critical hits. Callers validate
//! `min <= max` and `0 <= crit_chance <= 1` beforehand (see
//! `EncounterConfig::validate`); these functions assume both hold.

use rand::Rng;

/// Outcome of a damage roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub damage: f64,
    pub crit: bool,
}

/// Sample a weapon damage value uniformly from `[min, max)`
///
/// A degenerate range (`min == max`) always yields `min`.
pub fn weapon_roll<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Apply an independent crit trial to an already computed hit
pub fn apply_crit<R: Rng + ?Sized>(
    rng: &mut R,
    base: f64,
    crit_chance: f64,
    crit_multiplier: f64,
) -> DamageRoll {
    let crit = rng.gen_bool(crit_chance);
    let damage = if crit { base * crit_multiplier } else { base };
    DamageRoll { damage, crit }
}

/// Weapon roll, scaled into a hit by `scale`, followed by a crit trial
///
/// The crit multiplies the scaled hit, not the raw weapon roll.
pub fn roll<R, F>(
    rng: &mut R,
    min: f64,
    max: f64,
    scale: F,
    crit_chance: f64,
    crit_multiplier: f64,
) -> DamageRoll
where
    R: Rng + ?Sized,
    F: FnOnce(f64) -> f64,
{
    let base = scale(weapon_roll(rng, min, max));
    apply_crit(rng, base, crit_chance, crit_multiplier)
}
