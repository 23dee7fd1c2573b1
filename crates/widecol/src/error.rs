//! Error types for mapping construction, encoding and streaming decode.

use std::fmt;

use thiserror::Error;
use widecol_buffers::BufferError;
use widecol_types::TypeError;

/// Role a field plays in a mapping, used in configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Key,
    Component,
    Value,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldRole::Key => "key",
            FieldRole::Component => "component",
            FieldRole::Value => "value",
        })
    }
}

/// Failure to pack or unpack a composite column name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositeError {
    #[error("component of {len} bytes exceeds the 65535 byte composite limit")]
    ComponentTooLong { len: usize },
    #[error("truncated composite at byte {offset}: {source}")]
    Truncated {
        offset: usize,
        #[source]
        source: BufferError,
    },
}

/// Error returned by mapping construction, [`map`](crate::Mapping::map) and
/// [`unmap`](crate::Mapping::unmap).
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("mandatory setting '{setting}' not found for record type {record}")]
    MissingSetting {
        setting: &'static str,
        record: String,
    },
    #[error("{role} field {field} not found in record type {record}")]
    UnknownField {
        role: FieldRole,
        field: String,
        record: String,
    },
    #[error("unrecognized mapping type {kind} for record type {record}")]
    UnknownMappingKind { kind: String, record: String },
    #[error("field {field} declared twice in record type {record}")]
    DuplicateField { field: String, record: String },
    #[error("error marshaling field {field} of record type {record}: {source}")]
    Marshal {
        field: String,
        record: String,
        #[source]
        source: TypeError,
    },
    #[error("error unmarshaling field {field} of record type {record}: {source}")]
    Unmarshal {
        field: String,
        record: String,
        #[source]
        source: TypeError,
    },
    #[error("the mapping has {len} components and the passed position is {position}")]
    ComponentOutOfRange { position: usize, len: usize },
    #[error(
        "composite column name has {found} components, record type {record} expects {expected}"
    )]
    ShapeMismatch {
        record: String,
        expected: usize,
        found: usize,
    },
    #[error("column field name is not valid UTF-8 in record type {record}")]
    FieldName { record: String },
    #[error(transparent)]
    Composite(#[from] CompositeError),
    #[error("row provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MappingError {
    pub(crate) fn provider<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MappingError::Provider(Box::new(err))
    }
}
