//! Process-wide logger access point.
//!
//! [`SharedLogger`] wraps a [`Logger`] so it can live in a `static` and be
//! reached from anywhere in the firmware, including through the `log` crate
//! macros once installed with [`init_log_facade`].
//!
//! ```ignore
//! static LOGGER: SharedLogger<FixedClock> = SharedLogger::new(FixedClock(0));
//!
//! LOGGER.subscribe(ConsoleLogHandler::new(uart, ConsoleConfig::new()));
//! init_log_facade(&LOGGER)?;
//! log::info!("booted in {} ms", elapsed);
//! ```

use alloc::boxed::Box;
use core::cell::RefCell;
use core::fmt;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::clock::Clock;
use crate::error::DispatchReport;
use crate::level::Severity;
use crate::logger::Logger;
use crate::registry::{HandlerId, LogEventHandler};

/// A [`Logger`] behind an embassy-sync blocking mutex.
///
/// The lock is held for the whole dispatch, handler output included. With
/// the default [`CriticalSectionRawMutex`] that means interrupts stay masked
/// while a console line is written, so subscription changes and dispatches
/// from the main loop and interrupt handlers never interleave. Firmware that
/// only logs from one executor can pick a cheaper lock such as
/// `ThreadModeRawMutex` or `NoopRawMutex`.
///
/// A handler that logs again while its own dispatch is running does not
/// deadlock: the nested event is dropped and an empty report returned.
pub struct SharedLogger<C, R = CriticalSectionRawMutex> {
    inner: Mutex<R, RefCell<Logger<C>>>,
}

impl<C: Clock, R: RawMutex> SharedLogger<C, R> {
    pub const fn new(clock: C) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Logger::new(clock))),
        }
    }

    /// Run `f` on the logger, or return `None` if it is already in use
    /// further up the call stack.
    fn with_logger<T>(&self, f: impl FnOnce(&mut Logger<C>) -> T) -> Option<T> {
        self.inner.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut logger) => Some(f(&mut logger)),
            Err(_) => None,
        })
    }

    /// See [`Logger::subscribe`]. Rejected when called from inside a handler.
    pub fn subscribe<H>(&self, handler: H) -> HandlerId
    where
        H: LogEventHandler + 'static,
    {
        self.with_logger(|logger| logger.subscribe(handler))
            .unwrap_or(HandlerId::REJECTED)
    }

    /// See [`Logger::subscribe_boxed`]
    pub fn subscribe_boxed(&self, handler: Option<Box<dyn LogEventHandler>>) -> HandlerId {
        self.with_logger(|logger| logger.subscribe_boxed(handler))
            .unwrap_or(HandlerId::REJECTED)
    }

    /// See [`Logger::unsubscribe`]. Ignored when called from inside a handler.
    pub fn unsubscribe(&self, id: HandlerId) {
        self.with_logger(|logger| logger.unsubscribe(id));
    }

    /// Number of subscribed handlers.
    pub fn handler_count(&self) -> usize {
        self.with_logger(|logger| logger.registry().len())
            .unwrap_or(0)
    }

    /// See [`Logger::log`]
    pub fn log(&self, level: Severity, file: &str, line: u32, message: &str) -> DispatchReport {
        self.with_logger(|logger| logger.log(level, file, line, message))
            .unwrap_or_default()
    }

    /// See [`Logger::logf`]
    pub fn logf(
        &self,
        level: Severity,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> DispatchReport {
        self.with_logger(|logger| logger.logf(level, file, line, args))
            .unwrap_or_default()
    }
}

impl<C, R> fmt::Debug for SharedLogger<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLogger").finish_non_exhaustive()
    }
}

/// Backend for the `log` crate macros.
///
/// Always enabled; `Trace` records arrive as [`Severity::Debug`].
impl<C: Clock + Send, R: RawMutex + Send + Sync> Log for SharedLogger<C, R> {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        // Handlers do their own filtering
        true
    }

    fn log(&self, record: &Record) {
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);
        self.logf(record.level().into(), file, line, *record.args());
    }

    fn flush(&self) {
        // Nothing buffered
    }
}

/// Install `logger` as the `log` crate backend with the max level at `Trace`.
///
/// Fails if another backend was installed first.
pub fn init_log_facade<C, R>(logger: &'static SharedLogger<C, R>) -> Result<(), SetLoggerError>
where
    C: Clock + Send + 'static,
    R: RawMutex + Send + Sync + 'static,
{
    log::set_logger(logger).map(|()| log::set_max_level(LevelFilter::Trace))
}
