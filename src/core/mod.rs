pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EncounterConfig, ExperimentConfig};
pub use error::{Result, RotationError};
pub use types::{Action, Buff, Tick};
