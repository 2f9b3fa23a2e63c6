//! Firmware logging facility.
//!
//! Firmware code emits leveled, formatted messages through a [`Logger`]
//! without knowing where they end up. Sinks subscribe as
//! [`LogEventHandler`]s and receive every [`LogEvent`] in subscription order.
//!
//! - [`EventHandlerRegistry`]: subscribe/unsubscribe and dispatch
//! - [`FormattingEngine`]: fixed 64-byte buffer first, exact-size heap buffer on overflow
//! - [`Logger`]: the `log`/`logf` entry points
//! - [`SharedLogger`]: a `static`-friendly access point, also usable as a `log` crate backend
//! - [`ConsoleLogHandler`]: colorized single-line console output

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod console;
pub mod error;
pub mod event;
pub mod format;
pub mod level;
pub mod logger;
mod macros;
pub mod registry;
pub mod shared;

pub use clock::{Clock, FixedClock};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use console::{ConsoleConfig, ConsoleLine, ConsoleLogHandler, LineEnding};
#[cfg(feature = "std")]
pub use console::StdoutWriter;
pub use error::{DispatchReport, HandlerError};
pub use event::LogEvent;
pub use format::FormattingEngine;
pub use level::Severity;
pub use logger::Logger;
pub use registry::{EventHandlerRegistry, HandlerId, LogEventHandler};
pub use shared::{SharedLogger, init_log_facade};
