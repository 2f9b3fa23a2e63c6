//! The event handed to every subscribed handler.

use chrono::{DateTime, Utc};

use crate::level::Severity;

/// One log event.
///
/// Built once per log call and passed by reference to each handler. The
/// borrowed `file` and `message` only live for the duration of the dispatch,
/// so handlers cannot keep them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEvent<'a> {
    /// UTC calendar time, second precision.
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    /// Source file of the log call site.
    pub file: &'a str,
    /// Source line of the log call site.
    pub line: u32,
    /// Fully formatted message text.
    pub message: &'a str,
}

impl<'a> LogEvent<'a> {
    pub fn new(
        timestamp: DateTime<Utc>,
        level: Severity,
        file: &'a str,
        line: u32,
        message: &'a str,
    ) -> Self {
        Self {
            timestamp,
            level,
            file,
            line,
            message,
        }
    }
}
