//! Field-to-column bindings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Binding of canonical fields to source columns.
///
/// Holds at most one column per field. Whether a column may serve several
/// fields is decided by the mapper, not by this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    bindings: BTreeMap<FieldKey, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column bound to `field`, if any.
    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.bindings.get(&field).map(String::as_str)
    }

    /// Bind `field` to `column`, returning the previous column.
    pub fn bind(&mut self, field: FieldKey, column: impl Into<String>) -> Option<String> {
        self.bindings.insert(field, column.into())
    }

    pub fn unbind(&mut self, field: FieldKey) -> Option<String> {
        self.bindings.remove(&field)
    }

    /// True when `field` has a non-empty column.
    pub fn is_bound(&self, field: FieldKey) -> bool {
        self.get(field).is_some_and(|column| !column.trim().is_empty())
    }

    /// Field currently bound to `column`, if any.
    pub fn field_for_column(&self, column: &str) -> Option<FieldKey> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == column)
            .map(|(field, _)| *field)
    }

    /// Bindings in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.bindings
            .iter()
            .map(|(field, column)| (*field, column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(FieldKey, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
