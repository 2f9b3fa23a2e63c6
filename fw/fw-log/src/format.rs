//! Message formatting with a fixed-size first attempt.
//!
//! Most log lines are short, so rendering starts in a 64-byte stack buffer
//! and only touches the heap when the text does not fit. The first pass keeps
//! counting past the end of the buffer, so the heap buffer is allocated at
//! exactly the right size before the second pass.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt::{self, Write};

/// Size of the stack buffer used for the first rendering pass.
pub const INLINE_CAPACITY: usize = 64;

/// Delivered in place of a message that could not be rendered.
pub const FORMAT_ERROR_MESSAGE: &str = "Error formatting log message";

/// Two-tier message formatter.
pub struct FormattingEngine;

impl FormattingEngine {
    /// Render `args` and return the text by value.
    pub fn format(args: fmt::Arguments<'_>) -> String {
        Self::format_with(|text| text.to_owned(), args)
    }

    /// Render `args` and hand the text to `on_ready`.
    ///
    /// The text only lives for the duration of the callback; any heap
    /// buffer is freed before this returns. Never fails: if the message
    /// cannot be rendered, `on_ready` receives [`FORMAT_ERROR_MESSAGE`].
    pub fn format_with<R>(on_ready: impl FnOnce(&str) -> R, args: fmt::Arguments<'_>) -> R {
        render(args, on_ready, |buf, len| buf.try_reserve_exact(len).is_ok())
    }
}

/// Core of the two-pass algorithm. `grow` reserves heap space for the slow
/// path and reports whether it succeeded.
fn render<R>(
    args: fmt::Arguments<'_>,
    on_ready: impl FnOnce(&str) -> R,
    grow: impl FnOnce(&mut String, usize) -> bool,
) -> R {
    let mut inline = InlineBuffer::new();
    if fmt::write(&mut inline, args).is_err() {
        return on_ready(FORMAT_ERROR_MESSAGE);
    }

    // room is kept for a terminator, so the text fits only below capacity
    if inline.required < INLINE_CAPACITY {
        return match inline.as_str() {
            Some(text) => on_ready(text),
            None => on_ready(FORMAT_ERROR_MESSAGE),
        };
    }

    let mut heap = String::new();
    if !grow(&mut heap, inline.required) {
        return on_ready(FORMAT_ERROR_MESSAGE);
    }
    if heap.write_fmt(args).is_err() {
        return on_ready(FORMAT_ERROR_MESSAGE);
    }
    on_ready(&heap)
}

/// Fixed buffer that truncates but keeps counting.
struct InlineBuffer {
    bytes: [u8; INLINE_CAPACITY],
    /// Bytes actually stored
    len: usize,
    /// Bytes the full text needs
    required: usize,
}

impl InlineBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; INLINE_CAPACITY],
            len: 0,
            required: 0,
        }
    }

    /// Stored text, if it was not cut in the middle of a character.
    fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes[..self.len]).ok()
    }
}

impl Write for InlineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = (INLINE_CAPACITY - 1).saturating_sub(self.len);
        let take = room.min(s.len());
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.required += s.len();
        Ok(())
    }
}
