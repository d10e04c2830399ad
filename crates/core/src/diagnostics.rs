//! Sinks for failures a plugin reports instead of propagating.

use std::error::Error;
use std::sync::Mutex;

/// Receives a descriptive message together with the error that caused it.
pub trait DiagnosticSink: Send + Sync {
    /// Records one failure.
    fn report(&self, message: &str, error: &(dyn Error + 'static));
}

/// Writes `"<message> <error>"` to the process's standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, message: &str, error: &(dyn Error + 'static)) {
        eprintln!("{} {}", message, error);
    }
}

/// Routes failures through the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, message: &str, error: &(dyn Error + 'static)) {
        log::error!("{} {}", message, error);
    }
}

/// Keeps every reported line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines reported so far.
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str, error: &(dyn Error + 'static)) {
        let line = format!("{} {}", message, error);
        match self.entries.lock() {
            Ok(mut entries) => entries.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}
