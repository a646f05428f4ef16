use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// A source row projected onto canonical field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRecord {
    /// Zero-based index of the data row in the source file (header excluded).
    pub row_index: usize,
    #[serde(flatten)]
    pub values: BTreeMap<FieldKey, String>,
}

impl MappedRecord {
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            values: BTreeMap::new(),
        }
    }

    /// Builder used mostly by tests and fixtures.
    #[must_use]
    pub fn with(mut self, field: FieldKey, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Value of `field`; empty when the field was unbound or the cell absent.
    pub fn get(&self, field: FieldKey) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }
}
