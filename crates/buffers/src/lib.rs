//! Byte-level cursors for the widecol wire layouts.
//!
//! All multi-byte quantities are big-endian, matching the wide-column store's
//! on-disk and on-wire byte order.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error returned by the bounds-checked [`Reader`] methods.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
}
