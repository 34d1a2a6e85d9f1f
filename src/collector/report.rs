//! Reporting collaborators.
//!
//! The collector never prints anything itself. Progress lines and error
//! dialogs go through these traits so the host decides how to show them.

/// Receives informational status updates. Best effort.
pub trait ProgressReporter: Send + Sync {
    /// Reports a status line.
    fn report(&self, text: &str);
}

/// Receives fatal and per-target errors.
pub trait ErrorReporter: Send + Sync {
    /// Reports an error with a short title and a detailed text.
    fn report(&self, title: &str, text: &str);
}

/// Reporter that forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, text: &str) {
        log::info!("{}", text);
    }
}

impl ErrorReporter for LogReporter {
    fn report(&self, title: &str, text: &str) {
        log::error!("{}: {}", title, text);
    }
}
