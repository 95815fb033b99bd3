//! Combat log recorded by traced encounters

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Action, Buff, Tick};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventType {
    Hit {
        action: Action,
        damage: f64,
        crit: bool,
    },
    BuffApplied {
        buff: Buff,
        expires_tick: Tick,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub tick: Tick,
    /// Seconds into the encounter
    pub time: f64,
    pub event_type: CombatEventType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatLog {
    pub events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: CombatEventType, tick: Tick, time: f64) {
        self.events.push(CombatEvent {
            tick,
            time,
            event_type,
        });
    }

    /// Resolved hits in order, as `(tick, action, damage, crit)`
    pub fn hits(&self) -> impl Iterator<Item = (Tick, Action, f64, bool)> + '_ {
        self.events.iter().filter_map(|e| match e.event_type {
            CombatEventType::Hit {
                action,
                damage,
                crit,
            } => Some((e.tick, action, damage, crit)),
            CombatEventType::BuffApplied { .. } => None,
        })
    }

    pub fn buff_applications(&self, buff: Buff) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.event_type, CombatEventType::BuffApplied { buff: b, .. } if b == buff))
            .count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
