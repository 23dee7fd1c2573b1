//! Compact mapping: a whole record in one column.

use std::fmt;

use crate::composite;
use crate::error::MappingError;
use crate::mapping::sparse::SparseMapping;
use crate::mapping::Decoded;
use crate::provider::{NextColumn, RowProvider};
use crate::record::Record;
use crate::row::{Column, Row};
use crate::spec::MappingSpec;

/// The column name is exactly the declared components, no field name.
const COMPACT_BIAS: usize = 0;

/// Key and component handling is delegated to an inner [`SparseMapping`];
/// the column layout and decode are compact-specific.
pub struct CompactMapping<T: 'static> {
    inner: SparseMapping<T>,
    value: Option<usize>,
}

impl<T: Record> CompactMapping<T> {
    pub(crate) fn new(spec: &MappingSpec) -> Result<Self, MappingError> {
        let inner = SparseMapping::new(spec)?;
        let value = inner.value_field();
        Ok(Self { inner, value })
    }

    pub fn sparse(&self) -> &SparseMapping<T> {
        &self.inner
    }

    pub fn map(&self, source: &T) -> Result<Row, MappingError> {
        let (mut row, components) = self.inner.start_map(source)?;
        let name = composite::pack(&components)?;
        let value = match self.value {
            Some(i) => {
                let f = self.inner.descriptor().field_at(i);
                f.marshal_value(source)
                    .map_err(|e| self.inner.marshal_error(f, e))?
            }
            None => Vec::new(),
        };
        row.columns.push(Column::new(name, value));
        Ok(row)
    }

    /// Decodes exactly one column. Any exhaustion signal ends the call.
    pub fn unmap<P: RowProvider>(
        &self,
        destination: &mut T,
        provider: &mut P,
    ) -> Result<Decoded, MappingError> {
        self.inner.start_unmap(destination, provider)?;

        let column = match provider.next_column().map_err(MappingError::provider)? {
            NextColumn::Column(column) => column,
            NextColumn::End(end) => return Ok(Decoded::End(end)),
        };

        let components = self.inner.extract_components(&column.name, COMPACT_BIAS)?;
        self.inner.unmap_components(destination, &components)?;
        if let Some(i) = self.value {
            let f = self.inner.descriptor().field_at(i);
            f.unmarshal_value(&column.value, destination)
                .map_err(|e| self.inner.unmarshal_error(f, e))?;
        }

        Ok(Decoded::Record)
    }
}

impl<T: 'static> fmt::Debug for CompactMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactMapping")
            .field("inner", &self.inner)
            .field("value", &self.value)
            .finish()
    }
}
