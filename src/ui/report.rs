//! Console rendering of experiment reports

use std::fmt::Display;
use std::io::{self, Write};

use crossterm::style::{style, Color, Stylize};

use crate::aggregate::output::{AggregateResult, ExperimentReport};
use crate::simulation::events::{CombatEventType, CombatLog};

/// Wraps text in an ANSI color when enabled
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    pub color: bool,
}

impl Painter {
    pub fn paint(&self, text: impl Display, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn render_baseline<W: Write>(
    out: &mut W,
    painter: Painter,
    title: &str,
    result: &AggregateResult,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", painter.paint(title, Color::Yellow))?;
    writeln!(
        out,
        "{}",
        painter.paint(format!("Avg Damage: {:.2}", result.mean_damage), Color::Green)
    )?;
    writeln!(
        out,
        "{}",
        painter.paint(format!("Avg Basic Strikes: {:.2}", result.mean_basic_strikes), Color::Cyan)
    )?;
    writeln!(
        out,
        "{}",
        painter.paint(format!("Avg Fast Specials: {:.2}", result.mean_fast_specials), Color::Magenta)
    )?;
    writeln!(
        out,
        "{}",
        painter.paint(format!("Avg Slow Specials: {:.2}", result.mean_slow_specials), Color::Blue)
    )
}

pub fn render_report<W: Write>(
    out: &mut W,
    report: &ExperimentReport,
    painter: Painter,
) -> io::Result<()> {
    render_baseline(out, painter, "Fast Priority Strategy:", &report.fast_priority)?;
    render_baseline(out, painter, "Slow Priority Strategy:", &report.slow_priority)?;

    writeln!(out)?;
    writeln!(out, "{}", painter.paint("Balanced Priority Strategy:", Color::Yellow))?;
    if report.balanced.is_empty() {
        writeln!(out, "No thresholds fit inside the swing interval")?;
    }
    for (i, entry) in report.balanced.iter().enumerate() {
        let marker = if report.top_index == Some(i) {
            painter.paint(" (Top DPS)", Color::Red)
        } else {
            String::new()
        };
        writeln!(
            out,
            "{} | {} | {}{}",
            painter.paint(
                format!("{} | Avg Damage: {:.2}", entry.result.policy, entry.result.mean_damage),
                Color::Green
            ),
            painter.paint(
                format!("vs Fast: {}", format_percent(entry.vs_fast_percent)),
                Color::Magenta
            ),
            painter.paint(
                format!("vs Slow: {}", format_percent(entry.vs_slow_percent)),
                Color::Cyan
            ),
            marker
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", painter.paint("Strategies:", Color::Cyan))?;
    writeln!(
        out,
        "{} fast special on cooldown; the slow special only goes out when a swing is already due.",
        painter.paint("Fast priority:", Color::Green)
    )?;
    writeln!(
        out,
        "{} slow special whenever it is up; the fast special only fills the moment right after a swing.",
        painter.paint("Slow priority:", Color::Green)
    )?;
    writeln!(
        out,
        "{} hold the fast special when the slow special can land within the threshold of the next swing. \
         Too high a threshold starves the fast special, too low wastes slow special alignment.",
        painter.paint("Balanced:", Color::Green)
    )?;
    writeln!(out)?;
    writeln!(out, "{}", report.summary())
}

pub fn render_log<W: Write>(out: &mut W, log: &CombatLog, painter: Painter) -> io::Result<()> {
    for event in &log.events {
        match &event.event_type {
            CombatEventType::Hit {
                action,
                damage,
                crit,
            } => {
                let line = format!(
                    "[{:>8.2}s] {:<13} {:>9.2}{}",
                    event.time,
                    action.name(),
                    damage,
                    if *crit { " crit" } else { "" }
                );
                let color = if *crit { Color::Red } else { Color::Green };
                writeln!(out, "{}", painter.paint(line, color))?;
            }
            CombatEventType::BuffApplied { buff, expires_tick } => {
                writeln!(
                    out,
                    "{}",
                    painter.paint(
                        format!(
                            "[{:>8.2}s] {} until tick {}",
                            event.time,
                            buff.name(),
                            expires_tick
                        ),
                        Color::Yellow
                    )
                )?;
            }
        }
    }
    Ok(())
}
