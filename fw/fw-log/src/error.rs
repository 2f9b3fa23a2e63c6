//! Error types for fw-log

use alloc::string::String;
use core::fmt;

use crate::registry::HandlerId;

/// Error returned by a handler that could not deliver an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Writing to the output stream failed
    Write,
    /// Handler refused or failed to ship the event
    Rejected(String),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Write => write!(f, "Write error"),
            HandlerError::Rejected(msg) => write!(f, "Handler rejected event: {msg}"),
        }
    }
}

impl From<fmt::Error> for HandlerError {
    fn from(_: fmt::Error) -> Self {
        HandlerError::Write
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HandlerError {
    // Default implementation is sufficient
}

/// Outcome of dispatching one event to every handler.
///
/// A failing handler never stops the handlers after it; failures are only
/// counted here. Callers that do not care can ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that returned `Ok`
    pub delivered: usize,
    /// Handlers that returned an error
    pub failed: usize,
    /// The first handler that failed, and why
    pub first_failure: Option<(HandlerId, HandlerError)>,
}

impl DispatchReport {
    /// True if every handler accepted the event.
    pub fn is_ok(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn record(&mut self, id: HandlerId, result: Result<(), HandlerError>) {
        match result {
            Ok(()) => self.delivered += 1,
            Err(err) => {
                self.failed += 1;
                if self.first_failure.is_none() {
                    self.first_failure = Some((id, err));
                }
            }
        }
    }
}
