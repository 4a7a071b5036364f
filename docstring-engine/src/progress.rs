//! Lightweight progress reporting while a summary is being generated.
//!
//! Use `NoopProgress` for tests and non-interactive runs, `IndicatifProgress`
//! for a terminal.

use std::{sync::Mutex, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

/// Minimal progress interface used around each summarization call.
pub trait Progress: Send + Sync {
    /// Show an indicator for a task that just started.
    fn begin(&self, _msg: &str) {}
    /// Remove the indicator.
    fn end(&self) {}
}

/// No-op reporter.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Indicatif spinner, one per task.
pub struct IndicatifProgress {
    current: Mutex<Option<ProgressBar>>,
}

impl IndicatifProgress {
    pub fn spinner() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::spinner()
    }
}

impl Progress for IndicatifProgress {
    fn begin(&self, msg: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/ "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.current.lock() {
            if let Some(old) = slot.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn end(&self) {
        if let Ok(mut slot) = self.current.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}
