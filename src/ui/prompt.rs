//! Interactive parameter entry
//!
//! Reads numbers line by line. An empty line keeps the default, an
//! unparseable line asks again, end of input keeps every remaining default.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::core::config::ExperimentConfig;
use crate::core::error::Result;

pub struct Prompter<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            eof: false,
        }
    }

    /// Ask for one value until it parses
    pub fn ask<T>(&mut self, label: &str, default: T) -> Result<T>
    where
        T: FromStr + Display,
    {
        loop {
            if self.eof {
                return Ok(default);
            }

            write!(self.output, "{} (default {}): ", label, default)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                self.eof = true;
                writeln!(self.output)?;
                return Ok(default);
            }

            let line = line.trim();
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "'{}' is not a valid number, try again", line)?,
            }
        }
    }

    /// Collect the operator-facing parameters on top of `base`
    ///
    /// Special crit chances always follow the entered basic crit chance.
    /// Invalid combinations restart the questionnaire.
    pub fn ask_experiment(&mut self, base: &ExperimentConfig) -> Result<ExperimentConfig> {
        loop {
            let mut config = base.clone();
            let encounter = &mut config.encounter;

            encounter.min_damage = self.ask("Weapon minimum damage", encounter.min_damage)?;
            encounter.max_damage = self.ask("Weapon maximum damage", encounter.max_damage)?;
            encounter.swing_speed = self.ask("Swing speed in seconds", encounter.swing_speed)?;
            let crit_percent: f64 =
                self.ask("Basic crit chance in percent", encounter.basic_crit_chance * 100.0)?;
            *encounter = encounter.clone().with_basic_crit(crit_percent / 100.0);
            encounter.duration = self.ask("Encounter length in seconds", encounter.duration)?;
            config.runs = self.ask("Runs to average", config.runs)?;

            match config.validate() {
                Ok(()) => return Ok(config),
                Err(e) if self.eof => return Err(e),
                Err(e) => writeln!(self.output, "{}; please re-enter", e)?,
            }
        }
    }
}
