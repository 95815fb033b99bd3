pub mod abilities;
pub mod constants;
pub mod damage;

pub use abilities::{resolve_ability, AbilityFormula, AbilityHit};
pub use damage::{roll, DamageRoll};
