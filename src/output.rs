// src/output.rs

//! User-facing output sinks
//!
//! The installer reports what it is doing ("Resolving dependencies...",
//! "Installing demo (1.0)") through an [`Output`], separate from tracing logs.
//! The CLI prints to the console; tests capture lines with [`BufferedOutput`].

use std::cell::RefCell;

/// Line-oriented output sink
pub trait Output {
    fn write_line(&self, line: &str);
}

/// Prints to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl Output for NullOutput {
    fn write_line(&self, _line: &str) {}
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: RefCell<Vec<String>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Whether any line contains the given text
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl Output for BufferedOutput {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
