//! Schema-less conversion between field maps and rows.
//!
//! Rows built here use plain UTF-8 column names. On the way back the types
//! come from a scheme map of example values, since the bytes carry none.

use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use widecol_types::{default_type, marshal, unmarshal, TypeClass, Value};

use crate::error::MappingError;
use crate::row::{Column, Row};

const UNTYPED_RECORD: &str = "map";

fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or_default()
}

/// Converts a field map to a row keyed by `key`. Every column gets the same
/// write timestamp.
pub fn map_to_row(key: &str, fields: &IndexMap<String, Value>) -> Result<Row, MappingError> {
    let timestamp = now_micros();
    let marshal_error = |field: &str, source| MappingError::Marshal {
        field: field.to_string(),
        record: UNTYPED_RECORD.to_string(),
        source,
    };
    let key = marshal(&Value::from(key), &TypeClass::Utf8).map_err(|e| marshal_error(key, e))?;
    let mut row = Row::new(key);
    for (name, value) in fields {
        let bytes =
            marshal(value, &default_type(value)).map_err(|e| marshal_error(name.as_str(), e))?;
        row.columns.push(Column::new(name.as_bytes(), bytes).with_timestamp(timestamp));
    }
    Ok(row)
}

/// Converts a row back to a field map, typing each column after the example
/// value `scheme` holds under its name. Columns missing from the scheme are
/// skipped.
pub fn row_to_map(
    scheme: &IndexMap<String, Value>,
    row: &Row,
) -> Result<IndexMap<String, Value>, MappingError> {
    let mut out = IndexMap::with_capacity(row.columns.len());
    for column in &row.columns {
        let Ok(name) = std::str::from_utf8(&column.name) else {
            continue;
        };
        let Some(example) = scheme.get(name) else {
            continue;
        };
        let value = unmarshal(&column.value, &default_type(example)).map_err(|source| {
            MappingError::Unmarshal {
                field: name.to_string(),
                record: UNTYPED_RECORD.to_string(),
                source,
            }
        })?;
        out.insert(name.to_string(), value);
    }
    Ok(out)
}
