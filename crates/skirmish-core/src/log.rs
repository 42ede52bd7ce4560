//! Logging context
//!
//! Components do not consult any global verbosity flag. Each one receives a
//! `LogContext` at construction naming the section its events belong to and
//! whether raw wire traffic should be logged.

use tracing::debug;

/// Marker for a line read from a peer
pub const RECEIVED: &str = "->";
/// Marker for a line written to a peer
pub const SENT: &str = "<-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    name: String,
    verbose: bool,
}

impl LogContext {
    pub fn new(name: impl Into<String>, verbose: bool) -> Self {
        Self {
            name: name.into(),
            verbose,
        }
    }

    /// Context for a sub-component, keeping the verbosity flag
    pub fn named(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbose: self.verbose,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Log one line of wire traffic. Only emitted in verbose mode.
    pub fn wire(&self, direction: &str, line: &str) {
        if self.verbose {
            debug!(section = %self.name, "{} {}", direction, line.trim_end_matches(['\r', '\n']));
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new("skirmish", false)
    }
}
