//! Physical row and column shapes exchanged with the store.

/// One name/value cell of a row.
///
/// `ttl` and `timestamp` are write-time metadata; decoding ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
    pub ttl: Option<i32>,
    pub timestamp: Option<i64>,
}

impl Column {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ttl: None,
            timestamp: None,
        }
    }

    pub fn with_ttl(mut self, ttl: i32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A row key and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub key: Vec<u8>,
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            columns: Vec::new(),
        }
    }

    /// Orders columns by name the way the store returns them.
    pub fn sort_columns(&mut self) {
        self.columns.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &[u8]) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
