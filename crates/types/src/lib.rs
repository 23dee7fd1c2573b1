//! Store type tags and the scalar codec that turns typed values into column
//! bytes and back.
//!
//! # Example
//!
//! ```
//! use widecol_types::{marshal, unmarshal, TypeClass, Value};
//!
//! let bytes = marshal(&Value::Int(30), &TypeClass::Long).unwrap();
//! assert_eq!(bytes, 30i64.to_be_bytes());
//! assert_eq!(unmarshal(&bytes, &TypeClass::Long).unwrap(), Value::Int(30));
//! ```

mod codec;
mod error;
mod type_class;
mod value;

pub use codec::{marshal, unmarshal};
pub use error::TypeError;
pub use type_class::{default_type, parse_type_class, TypeClass, MARSHAL_PACKAGE};
pub use value::Value;
