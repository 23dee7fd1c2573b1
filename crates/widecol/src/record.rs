//! Field registry: per-type tables of field accessors and type tags.
//!
//! A record type implements [`Record`] by returning a [`RecordDescriptor`]
//! built once (typically inside a `OnceLock`). Mappings resolve field names
//! against the descriptor at construction time and afterwards only index it.

use std::collections::HashMap;
use std::fmt;

use widecol_types::{marshal, unmarshal, TypeClass, TypeError, Value};

use crate::error::MappingError;

/// Reads a field out of a record.
pub type Getter<T> = fn(&T) -> Value;
/// Writes a decoded value into a record field.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), TypeError>;

/// A type that can be mapped to and from rows.
pub trait Record: Sized + 'static {
    fn descriptor() -> &'static RecordDescriptor<Self>;
}

/// One declared field of a record type.
pub struct FieldDescriptor<T> {
    name: String,
    store_name: String,
    type_class: TypeClass,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used for the column in the store.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn type_class(&self) -> &TypeClass {
        &self.type_class
    }

    pub fn get(&self, record: &T) -> Value {
        (self.get)(record)
    }

    /// Column-name bytes for this field.
    pub fn marshal_name(&self) -> Vec<u8> {
        self.store_name.as_bytes().to_vec()
    }

    pub fn marshal_value(&self, record: &T) -> Result<Vec<u8>, TypeError> {
        marshal(&self.get(record), &self.type_class)
    }

    pub fn unmarshal_value(&self, bytes: &[u8], record: &mut T) -> Result<(), TypeError> {
        let value = unmarshal(bytes, &self.type_class)?;
        (self.set)(record, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("store_name", &self.store_name)
            .field("type_class", &self.type_class)
            .finish()
    }
}

/// Ordered field table for one record type, plus its mapping tags.
pub struct RecordDescriptor<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    by_name: HashMap<String, usize>,
    by_store_name: HashMap<String, usize>,
    tags: Vec<(String, String)>,
}

impl<T> RecordDescriptor<T> {
    pub fn builder(type_name: &'static str) -> RecordDescriptorBuilder<T> {
        RecordDescriptorBuilder {
            type_name,
            fields: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.field_index(name).map(|i| &self.fields[i])
    }

    /// Looks a field up by the name its column carries in the store.
    pub fn field_by_store_name(&self, store_name: &str) -> Option<&FieldDescriptor<T>> {
        self.by_store_name.get(store_name).map(|&i| &self.fields[i])
    }

    /// Mapping tags (`cf`, `key`, `cols`, `value`, `mapping`) declared with the type.
    pub fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn field_at(&self, index: usize) -> &FieldDescriptor<T> {
        &self.fields[index]
    }
}

impl<T> fmt::Debug for RecordDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Builder for [`RecordDescriptor`].
///
/// # Example
///
/// ```
/// use widecol::{RecordDescriptor, TypeClass};
///
/// struct User {
///     id: String,
///     age: i64,
/// }
///
/// let descriptor = RecordDescriptor::<User>::builder("User")
///     .tag("cf", "users")
///     .tag("key", "Id")
///     .field("Id", TypeClass::Utf8, |u| u.id.clone().into(), |u, v| {
///         u.id = v.try_into()?;
///         Ok(())
///     })
///     .field_as("Age", "age", TypeClass::Long, |u| u.age.into(), |u, v| {
///         u.age = v.try_into()?;
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.field_by_store_name("age").unwrap().name(), "Age");
/// ```
pub struct RecordDescriptorBuilder<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    tags: Vec<(String, String)>,
}

impl<T> RecordDescriptorBuilder<T> {
    /// Declares a field whose column name equals its declared name.
    pub fn field(
        self,
        name: &str,
        type_class: TypeClass,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        self.field_as(name, name, type_class, get, set)
    }

    /// Declares a field stored under a different column name.
    pub fn field_as(
        mut self,
        name: &str,
        store_name: &str,
        type_class: TypeClass,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            store_name: store_name.to_string(),
            type_class,
            get,
            set,
        });
        self
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    /// Finishes the table. Declared and store names must both be unique.
    pub fn build(self) -> Result<RecordDescriptor<T>, MappingError> {
        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut by_store_name = HashMap::with_capacity(self.fields.len());
        for (i, f) in self.fields.iter().enumerate() {
            let duplicate = by_name.insert(f.name.clone(), i).is_some()
                || by_store_name.insert(f.store_name.clone(), i).is_some();
            if duplicate {
                return Err(MappingError::DuplicateField {
                    field: f.name.clone(),
                    record: self.type_name.to_string(),
                });
            }
        }
        Ok(RecordDescriptor {
            type_name: self.type_name,
            fields: self.fields,
            by_name,
            by_store_name,
            tags: self.tags,
        })
    }
}
