//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one tick = `tick_size` seconds)
pub type Tick = u64;

/// An attack the rotation can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Auto-attack gated by the swing timer
    BasicStrike,
    /// Short-cooldown special that resets the swing timer
    FastSpecial,
    /// Long-cooldown special that must align with the next swing
    SlowSpecial,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::BasicStrike, Action::FastSpecial, Action::SlowSpecial];

    pub fn name(&self) -> &'static str {
        match self {
            Action::BasicStrike => "basic strike",
            Action::FastSpecial => "fast special",
            Action::SlowSpecial => "slow special",
        }
    }

    /// Whether using this action restarts the swing timer
    pub fn resets_swing(&self) -> bool {
        matches!(self, Action::BasicStrike | Action::FastSpecial)
    }
}

/// Haste buffs tracked by the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buff {
    /// Fixed-schedule haste, strongest discount
    Periodic,
    /// Chance-on-hit haste, weaker and shorter
    Proc,
}

impl Buff {
    pub fn name(&self) -> &'static str {
        match self {
            Buff::Periodic => "periodic haste",
            Buff::Proc => "proc haste",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_slow_special_keeps_swing_timer() {
        assert!(Action::BasicStrike.resets_swing());
        assert!(Action::FastSpecial.resets_swing());
        assert!(!Action::SlowSpecial.resets_swing());
    }
}
