//! Combat constants - ability formulas and haste values in one place

// Time constants
pub const DEFAULT_TICK_SIZE: f64 = 0.01;
pub const FAST_SPECIAL_COOLDOWN: f64 = 4.0;
pub const SLOW_SPECIAL_COOLDOWN: f64 = 5.0;

// Ability scaling: damage = weapon roll * scale + flat bonus
pub const BASIC_WEAPON_SCALE: f64 = 1.0;
pub const BASIC_FLAT_BONUS: f64 = 0.0;
pub const FAST_WEAPON_SCALE: f64 = 0.8;
pub const FAST_FLAT_BONUS: f64 = 135.0;
pub const SLOW_WEAPON_SCALE: f64 = 1.2;
pub const SLOW_FLAT_BONUS: f64 = 160.0;

// Specials crit more often than basic strikes
pub const SPECIAL_CRIT_BONUS: f64 = 0.06;

// Swing interval multipliers (only the strongest active one applies)
pub const PERIODIC_HASTE_FACTOR: f64 = 0.6;
pub const PROC_HASTE_FACTOR: f64 = 0.85;
