use thiserror::Error;
use widecol_buffers::BufferError;

use crate::TypeClass;

/// Error returned when a value cannot be converted to or from column bytes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("cannot marshal {value} value as {type_class}")]
    Unsupported {
        value: &'static str,
        type_class: TypeClass,
    },
    #[error("{type_class} expects {expected} bytes, found {found}")]
    InvalidLength {
        type_class: TypeClass,
        expected: usize,
        found: usize,
    },
    #[error("value out of range for {0}")]
    OutOfRange(TypeClass),
    #[error("invalid UTF-8 in {0} value")]
    InvalidUtf8(TypeClass),
    #[error("non-ASCII byte in AsciiType value")]
    InvalidAscii,
    #[error("truncated value: {0}")]
    Truncated(#[from] BufferError),
    #[error("expected {expected} value, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}
