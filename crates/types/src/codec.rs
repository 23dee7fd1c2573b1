//! Scalar marshaling between [`Value`] and column bytes.

use widecol_buffers::{Reader, Writer};

use crate::{TypeClass, TypeError, Value};

/// Encodes `value` as the byte layout of `type_class`.
pub fn marshal(value: &Value, type_class: &TypeClass) -> Result<Vec<u8>, TypeError> {
    let unsupported = || TypeError::Unsupported {
        value: value.kind(),
        type_class: type_class.clone(),
    };
    let mut w = Writer::with_capacity(16);
    match (type_class, value) {
        (TypeClass::Reversed(inner), _) => return marshal(value, inner),
        (TypeClass::Bytes | TypeClass::Composite(_), Value::Bytes(b)) => w.buf(b),
        (TypeClass::Bytes, Value::Str(s)) => w.buf(s.as_bytes()),
        (TypeClass::Bytes, Value::Uuid(u)) => w.buf(u),
        (TypeClass::Utf8, Value::Str(s)) => w.buf(s.as_bytes()),
        (TypeClass::Utf8 | TypeClass::Ascii, Value::Bytes(b)) => w.buf(b),
        (TypeClass::Ascii, Value::Str(s)) => {
            if !s.is_ascii() {
                return Err(TypeError::InvalidAscii);
            }
            w.buf(s.as_bytes());
        }
        (TypeClass::Long | TypeClass::Date | TypeClass::Counter, Value::Int(i)) => w.i64(*i),
        (TypeClass::Int32, Value::Int(i)) => {
            let narrow =
                i32::try_from(*i).map_err(|_| TypeError::OutOfRange(type_class.clone()))?;
            w.i32(narrow);
        }
        (TypeClass::Integer, Value::Int(i)) => w.buf(&varint_bytes(*i)),
        (TypeClass::Boolean, Value::Bool(b)) => w.u8(u8::from(*b)),
        (TypeClass::Float, Value::Float(f)) => w.f32(*f),
        (TypeClass::Double, Value::Double(f)) => w.f64(*f),
        (TypeClass::Double, Value::Float(f)) => w.f64(*f as f64),
        (TypeClass::Uuid | TypeClass::LexicalUuid | TypeClass::TimeUuid, Value::Uuid(u)) => {
            w.buf(u)
        }
        (TypeClass::Uuid | TypeClass::LexicalUuid | TypeClass::TimeUuid, Value::Bytes(b)) => {
            if b.len() != 16 {
                return Err(TypeError::InvalidLength {
                    type_class: type_class.clone(),
                    expected: 16,
                    found: b.len(),
                });
            }
            w.buf(b);
        }
        _ => return Err(unsupported()),
    }
    Ok(w.flush())
}

/// Decodes column bytes laid out as `type_class` into the canonical [`Value`]
/// variant for that class.
pub fn unmarshal(bytes: &[u8], type_class: &TypeClass) -> Result<Value, TypeError> {
    let fixed = |expected: usize| {
        if bytes.len() == expected {
            Ok(Reader::new(bytes))
        } else {
            Err(TypeError::InvalidLength {
                type_class: type_class.clone(),
                expected,
                found: bytes.len(),
            })
        }
    };
    let value = match type_class {
        TypeClass::Reversed(inner) => return unmarshal(bytes, inner),
        TypeClass::Bytes | TypeClass::Composite(_) => Value::Bytes(bytes.to_vec()),
        TypeClass::Utf8 => match std::str::from_utf8(bytes) {
            Ok(s) => Value::Str(s.to_string()),
            Err(_) => return Err(TypeError::InvalidUtf8(type_class.clone())),
        },
        TypeClass::Ascii => {
            if !bytes.is_ascii() {
                return Err(TypeError::InvalidAscii);
            }
            Value::Str(bytes.iter().map(|&b| b as char).collect())
        }
        TypeClass::Long | TypeClass::Date | TypeClass::Counter => Value::Int(fixed(8)?.i64()?),
        TypeClass::Int32 => Value::Int(fixed(4)?.i32()? as i64),
        TypeClass::Integer => Value::Int(varint_value(bytes, type_class)?),
        TypeClass::Boolean => Value::Bool(fixed(1)?.u8()? != 0),
        TypeClass::Float => Value::Float(fixed(4)?.f32()?),
        TypeClass::Double => Value::Double(fixed(8)?.f64()?),
        TypeClass::Uuid | TypeClass::LexicalUuid | TypeClass::TimeUuid => {
            let mut uuid = [0u8; 16];
            uuid.copy_from_slice(fixed(16)?.buf(16)?);
            Value::Uuid(uuid)
        }
    };
    Ok(value)
}

/// Minimal big-endian two's complement representation.
fn varint_bytes(n: i64) -> Vec<u8> {
    let bytes = n.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

fn varint_value(bytes: &[u8], type_class: &TypeClass) -> Result<i64, TypeError> {
    if bytes.is_empty() {
        return Err(TypeError::InvalidLength {
            type_class: type_class.clone(),
            expected: 1,
            found: 0,
        });
    }
    if bytes.len() > 8 {
        return Err(TypeError::OutOfRange(type_class.clone()));
    }
    let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut buf = [fill; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(buf))
}
