//! Translation of keyspace metadata into per-column-family type tags.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;
use widecol_types::{parse_type_class, TypeClass};

/// Column family kind translated by [`Schema::from_keyspace`].
pub const STANDARD_COLUMN_TYPE: &str = "Standard";

/// Keyspace definition as reported by the store. Entries may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyspaceDef {
    pub name: String,
    #[serde(default)]
    pub cf_defs: Vec<Option<CfDef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfDef {
    pub name: String,
    #[serde(default)]
    pub column_type: Option<String>,
    #[serde(default)]
    pub comparator_type: Option<String>,
    #[serde(default)]
    pub default_validation_class: Option<String>,
    #[serde(default)]
    pub key_validation_class: Option<String>,
    #[serde(default)]
    pub column_metadata: Vec<Option<ColumnDef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnDef {
    pub name: Vec<u8>,
    pub validation_class: String,
}

/// Type tags of one column family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamily {
    pub default_comparator: TypeClass,
    pub default_validator: TypeClass,
    pub key_validator: TypeClass,
    /// Validators declared for individual column names.
    pub named_columns: HashMap<String, TypeClass>,
}

impl ColumnFamily {
    /// Validator for the named column, falling back to the default.
    pub fn validator(&self, column: &str) -> &TypeClass {
        self.named_columns
            .get(column)
            .unwrap_or(&self.default_validator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub column_families: HashMap<String, ColumnFamily>,
}

fn type_or_bytes(raw: Option<&str>) -> TypeClass {
    raw.map(parse_type_class).unwrap_or(TypeClass::Bytes)
}

impl Schema {
    /// Translates standard column families; counter and super families are
    /// left out and null entries are skipped.
    pub fn from_keyspace(ks: &KeyspaceDef) -> Self {
        let mut schema = Schema::default();
        for cf_def in &ks.cf_defs {
            let Some(cf_def) = cf_def else {
                warn!(keyspace = %ks.name, "skipping null column family definition");
                continue;
            };
            let column_type = cf_def.column_type.as_deref().unwrap_or(STANDARD_COLUMN_TYPE);
            if column_type != STANDARD_COLUMN_TYPE {
                continue;
            }

            let mut named_columns = HashMap::with_capacity(cf_def.column_metadata.len());
            for col_def in cf_def.column_metadata.iter().flatten() {
                let name = String::from_utf8_lossy(&col_def.name).into_owned();
                named_columns.insert(name, parse_type_class(&col_def.validation_class));
            }

            let cf = ColumnFamily {
                default_comparator: type_or_bytes(cf_def.comparator_type.as_deref()),
                default_validator: type_or_bytes(cf_def.default_validation_class.as_deref()),
                key_validator: type_or_bytes(cf_def.key_validation_class.as_deref()),
                named_columns,
            };
            schema.column_families.insert(cf_def.name.clone(), cf);
        }
        schema
    }

    pub fn column_family(&self, name: &str) -> Option<&ColumnFamily> {
        self.column_families.get(name)
    }
}
