//! Store comparator/validator type tags.

use std::fmt;

use tracing::warn;

use crate::Value;

/// Package prefix the store uses for its fully qualified marshal classes.
pub const MARSHAL_PACKAGE: &str = "org.apache.cassandra.db.marshal.";

/// Type tag deciding how a scalar is laid out in a column name or value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Bytes,
    Ascii,
    Utf8,
    Long,
    Int32,
    /// Arbitrary precision integer, minimal two's complement.
    Integer,
    Boolean,
    Float,
    Double,
    /// Milliseconds since the epoch.
    Date,
    Uuid,
    LexicalUuid,
    TimeUuid,
    Counter,
    Composite(Vec<TypeClass>),
    Reversed(Box<TypeClass>),
}

impl TypeClass {
    /// Store-facing short name, without the marshal package prefix.
    pub fn name(&self) -> &'static str {
        match self {
            TypeClass::Bytes => "BytesType",
            TypeClass::Ascii => "AsciiType",
            TypeClass::Utf8 => "UTF8Type",
            TypeClass::Long => "LongType",
            TypeClass::Int32 => "Int32Type",
            TypeClass::Integer => "IntegerType",
            TypeClass::Boolean => "BooleanType",
            TypeClass::Float => "FloatType",
            TypeClass::Double => "DoubleType",
            TypeClass::Date => "DateType",
            TypeClass::Uuid => "UUIDType",
            TypeClass::LexicalUuid => "LexicalUUIDType",
            TypeClass::TimeUuid => "TimeUUIDType",
            TypeClass::Counter => "CounterColumnType",
            TypeClass::Composite(_) => "CompositeType",
            TypeClass::Reversed(_) => "ReversedType",
        }
    }

    fn from_simple_name(name: &str) -> Option<TypeClass> {
        let tc = match name {
            "BytesType" => TypeClass::Bytes,
            "AsciiType" => TypeClass::Ascii,
            "UTF8Type" => TypeClass::Utf8,
            "LongType" => TypeClass::Long,
            "Int32Type" => TypeClass::Int32,
            "IntegerType" => TypeClass::Integer,
            "BooleanType" => TypeClass::Boolean,
            "FloatType" => TypeClass::Float,
            "DoubleType" => TypeClass::Double,
            "DateType" | "TimestampType" => TypeClass::Date,
            "UUIDType" => TypeClass::Uuid,
            "LexicalUUIDType" => TypeClass::LexicalUuid,
            "TimeUUIDType" => TypeClass::TimeUuid,
            "CounterColumnType" => TypeClass::Counter,
            _ => return None,
        };
        Some(tc)
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeClass::Composite(components) => {
                f.write_str("CompositeType(")?;
                for (i, c) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
            TypeClass::Reversed(inner) => write!(f, "ReversedType({inner})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses a store type string such as `org.apache.cassandra.db.marshal.UTF8Type`
/// or `CompositeType(UTF8Type,LongType)`.
///
/// Unrecognised names fall back to [`TypeClass::Bytes`], which keeps raw bytes
/// intact.
pub fn parse_type_class(raw: &str) -> TypeClass {
    let s = raw.trim();
    let s = s.strip_prefix(MARSHAL_PACKAGE).unwrap_or(s);
    if let Some((outer, args)) = split_params(s) {
        match outer {
            "CompositeType" => {
                let components = split_top_level(args).into_iter().map(parse_type_class);
                return TypeClass::Composite(components.collect());
            }
            "ReversedType" => return TypeClass::Reversed(Box::new(parse_type_class(args))),
            _ => {}
        }
    }
    match TypeClass::from_simple_name(s) {
        Some(tc) => tc,
        None => {
            warn!(type_name = raw, "unrecognised store type, treating as BytesType");
            TypeClass::Bytes
        }
    }
}

fn split_params(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((&s[..open], inner))
}

/// Splits on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !s.is_empty() {
        parts.push(&s[start..]);
    }
    parts
}

/// Type class used for a value when no schema says otherwise.
pub fn default_type(value: &Value) -> TypeClass {
    match value {
        Value::Bytes(_) => TypeClass::Bytes,
        Value::Str(_) => TypeClass::Utf8,
        Value::Int(_) => TypeClass::Long,
        Value::Bool(_) => TypeClass::Boolean,
        Value::Float(_) => TypeClass::Float,
        Value::Double(_) => TypeClass::Double,
        Value::Uuid(_) => TypeClass::Uuid,
    }
}
