//! Operator-facing console I/O: parameter prompts and report rendering

pub mod prompt;
pub mod report;

pub use prompt::Prompter;
pub use report::{render_log, render_report, Painter};
