//! Sparse mapping: one column per field, grouped under a composite prefix.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace};
use widecol_types::{marshal, TypeError, Value};

use crate::composite::{self, Eoc};
use crate::error::{FieldRole, MappingError};
use crate::mapping::Decoded;
use crate::provider::{Exhaustion, NextColumn, RowProvider};
use crate::record::{FieldDescriptor, Record, RecordDescriptor};
use crate::row::{Column, Row};
use crate::spec::MappingSpec;

/// Trailing components beyond the declared ones: the field name.
const SPARSE_BIAS: usize = 1;

/// Decode progress within one `unmap` call.
enum GroupState {
    AwaitingFirstColumn,
    /// Component prefix shared by every column of the current record.
    InGroup(Vec<Vec<u8>>),
}

pub struct SparseMapping<T: 'static> {
    descriptor: &'static RecordDescriptor<T>,
    cf: String,
    key: usize,
    components: Vec<usize>,
    component_set: HashSet<usize>,
    /// Resolved for every kind; only compact mappings write it.
    value: Option<usize>,
}

impl<T: Record> SparseMapping<T> {
    pub(crate) fn new(spec: &MappingSpec) -> Result<Self, MappingError> {
        let descriptor = T::descriptor();
        let resolve = |role, name: &str| {
            descriptor
                .field_index(name)
                .ok_or_else(|| MappingError::UnknownField {
                    role,
                    field: name.to_string(),
                    record: descriptor.type_name().to_string(),
                })
        };
        let key = resolve(FieldRole::Key, spec.key.as_str())?;
        let components = spec
            .cols
            .iter()
            .map(|c| resolve(FieldRole::Component, c.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let value = spec
            .value
            .as_deref()
            .map(|name| resolve(FieldRole::Value, name))
            .transpose()?;
        Ok(Self {
            descriptor,
            cf: spec.cf.clone(),
            key,
            component_set: components.iter().copied().collect(),
            components,
            value,
        })
    }

    pub fn cf(&self) -> &str {
        &self.cf
    }

    pub(crate) fn descriptor(&self) -> &'static RecordDescriptor<T> {
        self.descriptor
    }

    pub(crate) fn value_field(&self) -> Option<usize> {
        self.value
    }

    /// Number of declared component fields.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    fn record_name(&self) -> String {
        self.descriptor.type_name().to_string()
    }

    pub(crate) fn marshal_error(
        &self,
        field: &FieldDescriptor<T>,
        source: TypeError,
    ) -> MappingError {
        MappingError::Marshal {
            field: field.name().to_string(),
            record: self.record_name(),
            source,
        }
    }

    pub(crate) fn unmarshal_error(
        &self,
        field: &FieldDescriptor<T>,
        source: TypeError,
    ) -> MappingError {
        MappingError::Unmarshal {
            field: field.name().to_string(),
            record: self.record_name(),
            source,
        }
    }

    pub fn marshal_key(&self, key: &Value) -> Result<Vec<u8>, MappingError> {
        let f = self.descriptor.field_at(self.key);
        marshal(key, f.type_class()).map_err(|e| self.marshal_error(f, e))
    }

    pub fn marshal_component(
        &self,
        component: &Value,
        position: usize,
    ) -> Result<Vec<u8>, MappingError> {
        let index = *self
            .components
            .get(position)
            .ok_or(MappingError::ComponentOutOfRange {
                position,
                len: self.components.len(),
            })?;
        let f = self.descriptor.field_at(index);
        marshal(component, f.type_class()).map_err(|e| self.marshal_error(f, e))
    }

    /// Packs the leading `components` into a slice bound, with `eoc` on the last one.
    pub fn component_bound(
        &self,
        components: &[Value],
        eoc: Eoc,
    ) -> Result<Vec<u8>, MappingError> {
        let parts = components
            .iter()
            .enumerate()
            .map(|(i, c)| self.marshal_component(c, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(composite::pack_with_eoc(&parts, eoc)?)
    }

    /// Marshals the key into a fresh row and returns the marshaled component values.
    pub(crate) fn start_map(&self, source: &T) -> Result<(Row, Vec<Vec<u8>>), MappingError> {
        let key_field = self.descriptor.field_at(self.key);
        let key = key_field
            .marshal_value(source)
            .map_err(|e| self.marshal_error(key_field, e))?;
        let components = self
            .components
            .iter()
            .map(|&i| {
                let f = self.descriptor.field_at(i);
                f.marshal_value(source).map_err(|e| self.marshal_error(f, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((Row::new(key), components))
    }

    pub fn map(&self, source: &T) -> Result<Row, MappingError> {
        let (mut row, components) = self.start_map(source)?;
        let prefix = composite::pack(&components)?;

        for (i, f) in self.descriptor.fields().iter().enumerate() {
            if i == self.key || self.component_set.contains(&i) {
                continue;
            }
            let field_name = f.marshal_name();
            let name = if components.is_empty() {
                field_name
            } else {
                let mut name = Vec::with_capacity(
                    prefix.len() + field_name.len() + composite::COMPONENT_OVERHEAD,
                );
                name.extend_from_slice(&prefix);
                composite::push_component(&mut name, &field_name)?;
                name
            };
            let value = f
                .marshal_value(source)
                .map_err(|e| self.marshal_error(f, e))?;
            row.columns.push(Column::new(name, value));
        }

        Ok(row)
    }

    /// Reads the row key into the key field.
    pub(crate) fn start_unmap<P: RowProvider>(
        &self,
        destination: &mut T,
        provider: &mut P,
    ) -> Result<(), MappingError> {
        let key = provider.key().map_err(MappingError::provider)?;
        let f = self.descriptor.field_at(self.key);
        f.unmarshal_value(&key, destination)
            .map_err(|e| self.unmarshal_error(f, e))
    }

    /// Splits a column name into components and checks it has the declared
    /// number plus `bias`.
    pub(crate) fn extract_components(
        &self,
        name: &[u8],
        bias: usize,
    ) -> Result<Vec<Vec<u8>>, MappingError> {
        let components = if !self.components.is_empty() {
            composite::unpack(name)?
        } else if bias == 0 && name.is_empty() {
            Vec::new()
        } else {
            vec![name.to_vec()]
        };
        let expected = self.components.len() + bias;
        if components.len() != expected {
            return Err(MappingError::ShapeMismatch {
                record: self.record_name(),
                expected,
                found: components.len(),
            });
        }
        Ok(components)
    }

    /// Writes the declared component values into their fields. Extra trailing
    /// components are left alone.
    pub(crate) fn unmap_components(
        &self,
        destination: &mut T,
        components: &[Vec<u8>],
    ) -> Result<(), MappingError> {
        for (&i, bytes) in self.components.iter().zip(components) {
            let f = self.descriptor.field_at(i);
            f.unmarshal_value(bytes, destination)
                .map_err(|e| self.unmarshal_error(f, e))?;
        }
        Ok(())
    }

    pub fn unmap<P: RowProvider>(
        &self,
        destination: &mut T,
        provider: &mut P,
    ) -> Result<Decoded, MappingError> {
        self.start_unmap(destination, provider)?;

        let mut state = GroupState::AwaitingFirstColumn;
        loop {
            let column = match provider.next_column().map_err(MappingError::provider)? {
                NextColumn::Column(column) => column,
                NextColumn::End(Exhaustion::EndBeforeLimit)
                    if matches!(state, GroupState::InGroup(_)) =>
                {
                    break
                }
                NextColumn::End(end) => return Ok(Decoded::End(end)),
            };

            let components = self.extract_components(&column.name, SPARSE_BIAS)?;
            let Some((field_name, prefix)) = components.split_last() else {
                return Err(MappingError::ShapeMismatch {
                    record: self.record_name(),
                    expected: self.components.len() + SPARSE_BIAS,
                    found: 0,
                });
            };

            match state {
                GroupState::AwaitingFirstColumn => {
                    self.unmap_components(destination, prefix)?;
                    state = GroupState::InGroup(prefix.to_vec());
                }
                GroupState::InGroup(ref current) => {
                    if current.as_slice() != prefix {
                        debug!(
                            record = self.descriptor.type_name(),
                            cf = %self.cf,
                            "component prefix changed, rewinding to next record"
                        );
                        provider.rewind();
                        break;
                    }
                }
            }

            let name = std::str::from_utf8(field_name).map_err(|_| MappingError::FieldName {
                record: self.record_name(),
            })?;
            match self.descriptor.field_by_store_name(name) {
                Some(f) => f
                    .unmarshal_value(&column.value, destination)
                    .map_err(|e| self.unmarshal_error(f, e))?,
                None => trace!(
                    record = self.descriptor.type_name(),
                    column = name,
                    "skipping column with no matching field"
                ),
            }
        }

        Ok(Decoded::Record)
    }
}

impl<T: 'static> fmt::Debug for SparseMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseMapping")
            .field("record", &self.descriptor.type_name())
            .field("cf", &self.cf)
            .field("key", &self.key)
            .field("components", &self.components)
            .field("value", &self.value)
            .finish()
    }
}
