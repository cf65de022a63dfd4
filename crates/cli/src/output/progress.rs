//! Spinner shown while the provisioning request is in flight

use std::time::Duration;

use super::OutputConfig;

/// Spinner wrapper
///
/// In quiet or JSON mode, or with `--no-progress`, nothing is drawn.
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Start a spinner with a message
    pub fn start(config: &OutputConfig, message: &str) -> Self {
        if config.quiet || config.json || config.no_progress {
            return Self { bar: None };
        }

        let bar = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
