//! Terminal implementations of the reporting collaborators.

use super::OutputManager;
use crate::collector::{ErrorReporter, ProgressReporter};

/// Prints progress and errors through an [`OutputManager`].
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    output: OutputManager,
}

impl TerminalReporter {
    /// Creates a reporter writing through `output`.
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl ProgressReporter for TerminalReporter {
    fn report(&self, text: &str) {
        if let Err(e) = self.output.progress(text) {
            log::debug!("Failed to print progress: {}", e);
        }
    }
}

impl ErrorReporter for TerminalReporter {
    fn report(&self, title: &str, text: &str) {
        if let Err(e) = self.output.error(title, text) {
            log::debug!("Failed to print error: {}", e);
        }
    }
}
