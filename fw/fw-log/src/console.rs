//! Console handler: one colorized text line per event.
//!
//! Line shape:
//!
//! ```text
//! 2024-03-05 07:08:09 <color>  ERROR <cyan>net.c[42] <reset>timeout
//! ```

use core::fmt::{self, Write};

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;
use crate::event::LogEvent;
use crate::format::FormattingEngine;
use crate::level::Severity;
use crate::registry::LogEventHandler;

/// ANSI color codes
pub mod colors {
    pub const RESET: &str = "\x1B[0m";
    pub const RED: &str = "\x1B[0;31m";
    pub const GREEN: &str = "\x1B[0;32m";
    pub const BLUE: &str = "\x1B[0;34m";
    pub const CYAN: &str = "\x1B[0;36m";
}

/// Width the level label is right-aligned to
pub const LEVEL_WIDTH: usize = 7;

/// Color for a level label.
pub const fn level_color(level: Severity) -> &'static str {
    match level {
        Severity::Debug => colors::BLUE,
        Severity::Info => colors::GREEN,
        Severity::Warning => colors::CYAN,
        Severity::Error => colors::RED,
    }
}

/// Line terminator written after each event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`, what serial terminals expect
    #[default]
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Console handler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Emit ANSI color sequences
    pub colors: bool,
    pub line_ending: LineEnding,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            colors: true,
            line_ending: LineEnding::CrLf,
        }
    }

    /// Default configuration, with colors turned off if `NO_COLOR` is set.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        Self {
            colors: std::env::var_os("NO_COLOR").is_none(),
            ..Self::new()
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `YYYY-MM-DD HH:MM:SS` rendering of a UTC time
struct Timestamp(DateTime<Utc>);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.0;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            t.year(),
            t.month(),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        )
    }
}

/// One rendered console line, without the terminator.
///
/// Pure formatting: displaying it has no side effects.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLine<'e, 'a> {
    pub event: &'e LogEvent<'a>,
    pub colors: bool,
}

impl fmt::Display for ConsoleLine<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.event;
        let (level_code, file_code, reset) = if self.colors {
            (level_color(event.level), colors::CYAN, colors::RESET)
        } else {
            ("", "", "")
        };
        write!(
            f,
            "{} {}{:>width$} {}{}[{}] {}{}",
            Timestamp(event.timestamp),
            level_code,
            event.level,
            file_code,
            event.file,
            event.line,
            reset,
            event.message,
            width = LEVEL_WIDTH,
        )
    }
}

/// Handler writing each event as one line to a text stream.
///
/// Stateless apart from the output stream; every event is rendered through
/// [`FormattingEngine`] and written with a single `write_str` followed by the
/// line terminator.
pub struct ConsoleLogHandler<W> {
    out: W,
    config: ConsoleConfig,
}

impl<W: Write> ConsoleLogHandler<W> {
    pub fn new(out: W, config: ConsoleConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render and write one event.
    pub fn write_event(&mut self, event: &LogEvent<'_>) -> fmt::Result {
        let line = ConsoleLine {
            event,
            colors: self.config.colors,
        };
        let out = &mut self.out;
        let ending = self.config.line_ending.as_str();
        FormattingEngine::format_with(
            |text| {
                out.write_str(text)?;
                out.write_str(ending)
            },
            format_args!("{line}"),
        )
    }
}

impl<W: Write + Send> LogEventHandler for ConsoleLogHandler<W> {
    fn handle(&mut self, event: &LogEvent<'_>) -> Result<(), HandlerError> {
        self.write_event(event).map_err(HandlerError::from)
    }
}

/// `fmt::Write` adapter over the process stdout
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutWriter;

#[cfg(feature = "std")]
impl Write for StdoutWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        use std::io::Write as _;

        std::io::stdout()
            .lock()
            .write_all(s.as_bytes())
            .map_err(|_| fmt::Error)
    }
}

#[cfg(feature = "std")]
impl ConsoleLogHandler<StdoutWriter> {
    /// Handler writing to stdout
    pub fn stdout(config: ConsoleConfig) -> Self {
        Self::new(StdoutWriter, config)
    }
}
