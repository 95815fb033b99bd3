//! Encounter simulation
//!
//! The per-tick engine, the encounter state it owns and the decision
//! policies it consults.

pub mod engine;
pub mod events;
pub mod policy;
pub mod state;

pub use engine::{Engine, TickSchedule};
pub use events::{CombatEvent, CombatEventType, CombatLog};
pub use policy::{balanced_decision, Balanced, FastPriority, RotationPolicy, SlowPriority};
pub use state::{EncounterState, TimerView, Totals};
