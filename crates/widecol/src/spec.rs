//! Declarative mapping configuration.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::error::MappingError;

/// How a record is laid out in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MappingKind {
    /// One column per field, grouped under a composite prefix.
    #[default]
    Sparse,
    /// One column per record: composite name, single value field.
    Compact,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized mapping type {0}")]
pub struct ParseMappingKindError(pub String);

impl FromStr for MappingKind {
    type Err = ParseMappingKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sparse" => Ok(MappingKind::Sparse),
            "compact" => Ok(MappingKind::Compact),
            other => Err(ParseMappingKindError(other.to_string())),
        }
    }
}

impl TryFrom<String> for MappingKind {
    type Error = ParseMappingKindError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MappingKind::Sparse => "sparse",
            MappingKind::Compact => "compact",
        })
    }
}

/// Mapping settings for one record type.
///
/// Deserializable from config, for instance TOML:
///
/// ```toml
/// cf = "events"
/// key = "Stream"
/// cols = ["At"]
/// value = "Payload"
/// mapping = "compact"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingSpec {
    /// Column family name.
    pub cf: String,
    /// Field holding the row key.
    pub key: String,
    /// Ordered fields packed into the composite column name.
    #[serde(default)]
    pub cols: Vec<String>,
    /// Field stored as the column value (compact mappings only).
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub mapping: MappingKind,
}

impl MappingSpec {
    pub fn sparse(cf: &str, key: &str) -> Self {
        Self {
            cf: cf.to_string(),
            key: key.to_string(),
            cols: Vec::new(),
            value: None,
            mapping: MappingKind::Sparse,
        }
    }

    pub fn compact(cf: &str, key: &str) -> Self {
        Self {
            mapping: MappingKind::Compact,
            ..Self::sparse(cf, key)
        }
    }

    pub fn with_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Builds settings from string tags: `cf` and `key` are mandatory, `cols`
    /// is a comma-separated field list, `value` and `mapping` are optional.
    /// Other keys are ignored.
    pub fn from_tags<'a, I>(record: &str, tags: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cf = None;
        let mut key = None;
        let mut cols = Vec::new();
        let mut value = None;
        let mut mapping = MappingKind::Sparse;
        for (k, v) in tags {
            match k {
                "cf" => cf = Some(v.to_string()),
                "key" => key = Some(v.to_string()),
                "cols" => {
                    cols = v
                        .split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string)
                        .collect()
                }
                "value" => value = Some(v.to_string()),
                "mapping" => {
                    mapping = v.parse().map_err(|ParseMappingKindError(kind)| {
                        MappingError::UnknownMappingKind {
                            kind,
                            record: record.to_string(),
                        }
                    })?
                }
                _ => {}
            }
        }
        let missing = |setting| MappingError::MissingSetting {
            setting,
            record: record.to_string(),
        };
        Ok(Self {
            cf: cf.ok_or_else(|| missing("cf"))?,
            key: key.ok_or_else(|| missing("key"))?,
            cols,
            value,
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_with_defaults() {
        let spec = MappingSpec::from_tags("User", [("cf", "users"), ("key", "Id")]).unwrap();
        assert_eq!(spec, MappingSpec::sparse("users", "Id"));
    }

    #[test]
    fn tags_split_cols_and_ignore_unknown_keys() {
        let spec = MappingSpec::from_tags(
            "Event",
            [
                ("cf", "events"),
                ("key", "Stream"),
                ("cols", "At, Seq"),
                ("value", "Payload"),
                ("mapping", "compact"),
                ("json", "ignored"),
            ],
        )
        .unwrap();
        assert_eq!(
            spec,
            MappingSpec::compact("events", "Stream")
                .with_cols(["At", "Seq"])
                .with_value("Payload")
        );
    }

    #[test]
    fn missing_mandatory_tag() {
        let err = MappingSpec::from_tags("User", [("key", "Id")]).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingSetting { setting: "cf", .. }
        ));
    }

    #[test]
    fn unknown_mapping_kind() {
        let err = MappingSpec::from_tags(
            "User",
            [("cf", "users"), ("key", "Id"), ("mapping", "dense")],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized mapping type dense for record type User"
        );
    }
}
