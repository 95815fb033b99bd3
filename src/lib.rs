//! Rotation Sim - Monte Carlo melee rotation analyzer
//!
//! Simulates a swing timer, two cooldown-gated specials and two haste buffs
//! tick by tick, and compares decision policies by averaging many runs.

pub mod aggregate;
pub mod combat;
pub mod core;
pub mod simulation;
pub mod ui;
