//! Leveled logging entry points.

use alloc::boxed::Box;
use core::fmt;

use crate::clock::Clock;
use crate::error::DispatchReport;
use crate::event::LogEvent;
use crate::format::FormattingEngine;
use crate::level::Severity;
use crate::registry::{EventHandlerRegistry, HandlerId, LogEventHandler};

/// Logger owning the handler registry and the time source.
///
/// There is normally exactly one per firmware image, created at startup and
/// kept for the life of the program. Use [`crate::SharedLogger`] when it has
/// to live in a `static`.
///
/// No level filtering happens here: every handler sees every event.
///
/// # Example
///
/// ```
/// use fw_log::{FixedClock, Logger, Severity};
///
/// let mut logger = Logger::new(FixedClock(0));
/// logger.subscribe(|event: &fw_log::LogEvent<'_>| -> Result<(), fw_log::HandlerError> {
///     assert_eq!(event.message, "count=5");
///     Ok(())
/// });
/// logger.logf(Severity::Info, file!(), line!(), format_args!("count={}", 5));
/// ```
pub struct Logger<C> {
    registry: EventHandlerRegistry,
    clock: C,
}

impl<C: Clock> Logger<C> {
    pub const fn new(clock: C) -> Self {
        Self {
            registry: EventHandlerRegistry::new(),
            clock,
        }
    }

    /// See [`EventHandlerRegistry::subscribe`]
    pub fn subscribe<H>(&mut self, handler: H) -> HandlerId
    where
        H: LogEventHandler + 'static,
    {
        self.registry.subscribe(handler)
    }

    /// See [`EventHandlerRegistry::subscribe_boxed`]
    pub fn subscribe_boxed(&mut self, handler: Option<Box<dyn LogEventHandler>>) -> HandlerId {
        self.registry.subscribe_boxed(handler)
    }

    /// See [`EventHandlerRegistry::unsubscribe`]
    pub fn unsubscribe(&mut self, id: HandlerId) {
        self.registry.unsubscribe(id)
    }

    pub fn registry(&self) -> &EventHandlerRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Log `message` verbatim. Never allocates unless a handler fails.
    ///
    /// When a handler fails, every handler is then sent one
    /// [`Severity::Warning`] event naming the first failure, from the same
    /// call site. Failures while delivering that notice are not reported
    /// again. The returned report covers the original event only.
    pub fn log(&mut self, level: Severity, file: &str, line: u32, message: &str) -> DispatchReport {
        let timestamp = self.clock.now_utc();
        let event = LogEvent::new(timestamp, level, file, line, message);
        let report = self.registry.dispatch(&event);
        if let Some((id, err)) = &report.first_failure {
            let total = report.failed + report.delivered;
            let registry = &mut self.registry;
            FormattingEngine::format_with(
                |notice| {
                    let notice = LogEvent::new(timestamp, Severity::Warning, file, line, notice);
                    registry.dispatch(&notice)
                },
                format_args!("Log handler {id} failed: {err} ({} of {total})", report.failed),
            );
        }
        report
    }

    /// Render `args` and log the result.
    ///
    /// Messages under 64 bytes are rendered on the stack; longer ones use
    /// one exactly-sized heap buffer that is freed before returning.
    pub fn logf(
        &mut self,
        level: Severity,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> DispatchReport {
        FormattingEngine::format_with(|message| self.log(level, file, line, message), args)
    }
}

impl<C> fmt::Debug for Logger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
