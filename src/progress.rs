// src/progress.rs

//! Progress tracking for package operations
//!
//! The `ProgressTracker` trait is implemented by:
//! - `CliProgress`: an indicatif progress bar for interactive runs
//! - `LogProgress`: logs progress to tracing
//! - `SilentProgress`: no-op for scripted/quiet modes and tests

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::Cell;
use tracing::info;

/// Core trait for progress tracking
pub trait ProgressTracker {
    /// Set the current status message
    fn set_message(&self, message: &str);

    /// Set the total number of steps
    fn set_length(&self, length: u64);

    /// Increment progress by the given amount
    fn increment(&self, amount: u64);

    /// Get current position
    fn position(&self) -> u64;

    /// Finish progress successfully with a message
    fn finish_with_message(&self, message: &str);

    /// Finish progress with an error/abandonment message
    fn finish_with_error(&self, message: &str);
}

/// Silent progress tracker (no-op)
#[derive(Debug, Default)]
pub struct SilentProgress {
    position: Cell<u64>,
}

impl SilentProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for SilentProgress {
    fn set_message(&self, _message: &str) {}

    fn set_length(&self, _length: u64) {}

    fn increment(&self, amount: u64) {
        self.position.set(self.position.get() + amount);
    }

    fn position(&self) -> u64 {
        self.position.get()
    }

    fn finish_with_message(&self, _message: &str) {}

    fn finish_with_error(&self, _message: &str) {}
}

/// Logging progress tracker
///
/// Logs every update to tracing at info level.
#[derive(Debug)]
pub struct LogProgress {
    name: String,
    position: Cell<u64>,
    length: Cell<u64>,
}

impl LogProgress {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Cell::new(0),
            length: Cell::new(0),
        }
    }
}

impl ProgressTracker for LogProgress {
    fn set_message(&self, message: &str) {
        info!("{}: {}", self.name, message);
    }

    fn set_length(&self, length: u64) {
        self.length.set(length);
    }

    fn increment(&self, amount: u64) {
        let position = self.position.get() + amount;
        self.position.set(position);
        info!("{}: {}/{}", self.name, position, self.length.get());
    }

    fn position(&self) -> u64 {
        self.position.get()
    }

    fn finish_with_message(&self, message: &str) {
        info!("{}: {}", self.name, message);
    }

    fn finish_with_error(&self, message: &str) {
        info!("{}: ERROR - {}", self.name, message);
    }
}

/// Progress bar for interactive terminals
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    pub fn new(operation: &str) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} ({pos}/{len}) [{bar:40.green/dim}] {percent}%")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        bar.set_message(operation.to_string());
        Self { bar }
    }
}

impl ProgressTracker for CliProgress {
    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
