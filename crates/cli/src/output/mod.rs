//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats, and the spinner shown while a request is in flight.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags and the config file
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable the spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
