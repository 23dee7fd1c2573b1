//! Bidirectional mapping between typed records and wide-column store rows.
//!
//! A record type describes its fields once through a [`RecordDescriptor`].
//! A [`Mapping`] built from that descriptor and a [`MappingSpec`] encodes
//! records into [`Row`]s and decodes them back from any [`RowProvider`]:
//!
//! - **sparse** mappings write one column per field, prefixed by the packed
//!   component fields, so one row can hold many records;
//! - **compact** mappings write one column per record whose name is the packed
//!   component fields and whose value is a single value field.
//!
//! # Example
//!
//! ```
//! use std::sync::OnceLock;
//! use widecol::{Decoded, Mapping, Record, RecordDescriptor, RowCursor, TypeClass};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Note {
//!     id: String,
//!     text: String,
//! }
//!
//! impl Record for Note {
//!     fn descriptor() -> &'static RecordDescriptor<Self> {
//!         static DESCRIPTOR: OnceLock<RecordDescriptor<Note>> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             RecordDescriptor::<Note>::builder("Note")
//!                 .tag("cf", "notes")
//!                 .tag("key", "Id")
//!                 .field("Id", TypeClass::Utf8, |n| n.id.clone().into(), |n, v| {
//!                     n.id = v.try_into()?;
//!                     Ok(())
//!                 })
//!                 .field("Text", TypeClass::Utf8, |n| n.text.clone().into(), |n, v| {
//!                     n.text = v.try_into()?;
//!                     Ok(())
//!                 })
//!                 .build()
//!                 .expect("valid descriptor")
//!         })
//!     }
//! }
//!
//! let mapping = Mapping::<Note>::from_record().unwrap();
//! let note = Note { id: "n1".into(), text: "hello".into() };
//! let row = mapping.map(&note).unwrap();
//! assert_eq!(row.columns[0].name, b"Text");
//!
//! let mut cursor = RowCursor::new(row);
//! let mut back = Note::default();
//! assert_eq!(mapping.unmap(&mut back, &mut cursor).unwrap(), Decoded::Record);
//! assert_eq!(back, note);
//! ```

pub mod composite;
mod error;
pub mod mapping;
mod provider;
mod record;
mod row;
pub mod schema;
mod spec;
pub mod untyped;

pub use composite::Eoc;
pub use error::{CompositeError, FieldRole, MappingError};
pub use mapping::{CompactMapping, Decoded, Mapping, SparseMapping};
pub use provider::{Exhaustion, NextColumn, RowCursor, RowProvider};
pub use record::{
    FieldDescriptor, Getter, Record, RecordDescriptor, RecordDescriptorBuilder, Setter,
};
pub use row::{Column, Row};
pub use schema::Schema;
pub use spec::{MappingKind, MappingSpec, ParseMappingKindError};
pub use untyped::{map_to_row, row_to_map};
pub use widecol_types::{TypeClass, TypeError, Value};
