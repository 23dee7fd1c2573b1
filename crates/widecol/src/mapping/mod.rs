//! Record-to-row mappings.
//!
//! A [`Mapping`] is built once per record type and is immutable afterwards;
//! it can be shared between threads mapping different records.

mod compact;
mod sparse;

pub use compact::CompactMapping;
pub use sparse::SparseMapping;

use tracing::debug;
use widecol_types::Value;

use crate::composite::Eoc;
use crate::error::MappingError;
use crate::provider::{Exhaustion, RowProvider};
use crate::record::Record;
use crate::row::Row;
use crate::spec::{MappingKind, MappingSpec};

/// Result of one `unmap` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A record was populated.
    Record,
    /// The provider ran out before a record could be produced. Fields written
    /// so far are not rolled back, so the destination should be discarded.
    End(Exhaustion),
}

impl Decoded {
    pub fn is_record(&self) -> bool {
        matches!(self, Decoded::Record)
    }
}

/// A sparse or compact mapping for record type `T`.
#[derive(Debug)]
pub enum Mapping<T: 'static> {
    Sparse(SparseMapping<T>),
    Compact(CompactMapping<T>),
}

impl<T: Record> Mapping<T> {
    /// Validates `spec` against `T`'s field table.
    pub fn new(spec: &MappingSpec) -> Result<Self, MappingError> {
        let mapping = match spec.mapping {
            MappingKind::Sparse => Mapping::Sparse(SparseMapping::new(spec)?),
            MappingKind::Compact => Mapping::Compact(CompactMapping::new(spec)?),
        };
        debug!(
            record = T::descriptor().type_name(),
            cf = %spec.cf,
            kind = %spec.mapping,
            components = spec.cols.len(),
            "built mapping"
        );
        Ok(mapping)
    }

    /// Builds the mapping from the tags declared on `T`'s descriptor.
    pub fn from_record() -> Result<Self, MappingError> {
        let descriptor = T::descriptor();
        let spec = MappingSpec::from_tags(descriptor.type_name(), descriptor.tags())?;
        Self::new(&spec)
    }

    fn sparse(&self) -> &SparseMapping<T> {
        match self {
            Mapping::Sparse(m) => m,
            Mapping::Compact(m) => m.sparse(),
        }
    }

    pub fn kind(&self) -> MappingKind {
        match self {
            Mapping::Sparse(_) => MappingKind::Sparse,
            Mapping::Compact(_) => MappingKind::Compact,
        }
    }

    /// Column family name.
    pub fn cf(&self) -> &str {
        self.sparse().cf()
    }

    /// Marshals a row key value with the key field's type.
    pub fn marshal_key(&self, key: &Value) -> Result<Vec<u8>, MappingError> {
        self.sparse().marshal_key(key)
    }

    /// Marshals a value with the type of the component field at `position`.
    pub fn marshal_component(
        &self,
        component: &Value,
        position: usize,
    ) -> Result<Vec<u8>, MappingError> {
        self.sparse().marshal_component(component, position)
    }

    /// Builds a slice bound from leading component values, for range queries.
    pub fn component_bound(
        &self,
        components: &[Value],
        eoc: Eoc,
    ) -> Result<Vec<u8>, MappingError> {
        self.sparse().component_bound(components, eoc)
    }

    /// Encodes `source` into a row.
    pub fn map(&self, source: &T) -> Result<Row, MappingError> {
        match self {
            Mapping::Sparse(m) => m.map(source),
            Mapping::Compact(m) => m.map(source),
        }
    }

    /// Decodes one logical record from `provider` into `destination`.
    ///
    /// Sparse mappings stop at the first column of the next record and leave
    /// the provider positioned on it, so repeated calls walk every record of a
    /// row. Compact mappings consume exactly one column per call.
    pub fn unmap<P: RowProvider>(
        &self,
        destination: &mut T,
        provider: &mut P,
    ) -> Result<Decoded, MappingError> {
        match self {
            Mapping::Sparse(m) => m.unmap(destination, provider),
            Mapping::Compact(m) => m.unmap(destination, provider),
        }
    }
}
