//! [`Value`]: the typed scalar exchanged between records and the codec.

use crate::TypeError;

/// A typed scalar held by a record field or an untyped field map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bytes(Vec<u8>),
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f32),
    Double(f64),
    Uuid([u8; 16]),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Uuid(_) => "uuid",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<[u8; 16]> for Value {
    fn from(v: [u8; 16]) -> Self {
        Value::Uuid(v)
    }
}

fn mismatch(expected: &'static str, found: &Value) -> TypeError {
    TypeError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl TryFrom<Value> for String {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bytes(b) => Ok(b),
            Value::Uuid(u) => Ok(u.to_vec()),
            other => Err(mismatch("bytes", &other)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Int(i) => Ok(i),
            other => Err(mismatch("integer", &other)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Int(i) => i32::try_from(i).map_err(|_| TypeError::Mismatch {
                expected: "32-bit integer",
                found: "wide integer",
            }),
            other => Err(mismatch("integer", &other)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Float(f) => Ok(f),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Double(f) => Ok(f),
            Value::Float(f) => Ok(f as f64),
            other => Err(mismatch("double", &other)),
        }
    }
}

impl TryFrom<Value> for [u8; 16] {
    type Error = TypeError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Uuid(u) => Ok(u),
            other => Err(mismatch("uuid", &other)),
        }
    }
}

/// JSON scalars map onto the closest variant; `null`, arrays and objects have
/// no column representation.
impl TryFrom<serde_json::Value> for Value {
    type Error = TypeError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::String(s) => Ok(Value::Str(s)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => Ok(Value::Double(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::Null => Err(TypeError::Mismatch {
                expected: "scalar",
                found: "null",
            }),
            serde_json::Value::Array(_) => Err(TypeError::Mismatch {
                expected: "scalar",
                found: "array",
            }),
            serde_json::Value::Object(_) => Err(TypeError::Mismatch {
                expected: "scalar",
                found: "object",
            }),
        }
    }
}
