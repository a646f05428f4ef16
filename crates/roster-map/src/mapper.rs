//! Column mapping state for the map step.
//!
//! Tracks the user's field bindings for one uploaded file and projects raw
//! rows through them.

use std::collections::HashSet;

use roster_model::{ColumnMapping, FieldKey, MappedRecord, SourceTable};
use tracing::debug;

use crate::error::MappingError;
use crate::registry::SchemaRegistry;

/// Mapping state for a single upload.
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    registry: SchemaRegistry,
    /// Headers of the uploaded file.
    columns: Vec<String>,
    mapping: ColumnMapping,
}

impl ColumnMapper {
    /// Start with an empty mapping.
    pub fn new(registry: SchemaRegistry, columns: Vec<String>) -> Self {
        Self {
            registry,
            columns,
            mapping: ColumnMapping::new(),
        }
    }

    /// Start from the registry's suggested mapping for `columns`.
    pub fn suggested(registry: SchemaRegistry, columns: Vec<String>) -> Self {
        let mapping = registry.suggest_mapping(&columns);
        Self {
            registry,
            columns,
            mapping,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Bind `field` to `column`, replacing any previous binding of `field`.
    ///
    /// An empty `column` clears the binding. Completeness is not checked here.
    ///
    /// # Errors
    ///
    /// - [`MappingError::ColumnNotFound`] if the file has no such header.
    /// - [`MappingError::ColumnAlreadyUsed`] if another field holds the column.
    pub fn set_mapping(&mut self, field: FieldKey, column: &str) -> Result<(), MappingError> {
        if column.trim().is_empty() {
            self.clear_mapping(field);
            return Ok(());
        }
        if !self.columns.iter().any(|c| c == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if let Some(owner) = self.mapping.field_for_column(column)
            && owner != field
        {
            return Err(MappingError::ColumnAlreadyUsed {
                column: column.to_string(),
                field: owner,
            });
        }
        self.mapping.bind(field, column);
        debug!(%field, column, "mapping set");
        Ok(())
    }

    /// Remove the binding of `field`. Returns true if one existed.
    pub fn clear_mapping(&mut self, field: FieldKey) -> bool {
        self.mapping.unbind(field).is_some()
    }

    /// True iff every required field has a non-empty binding.
    pub fn is_complete(&self) -> bool {
        self.registry
            .required_fields()
            .all(|field| self.mapping.is_bound(field.key))
    }

    /// Required fields still lacking a binding, in registry order.
    pub fn missing_required(&self) -> Vec<FieldKey> {
        self.registry
            .required_fields()
            .filter(|field| !self.mapping.is_bound(field.key))
            .map(|field| field.key)
            .collect()
    }

    /// Check if a source column is already used.
    pub fn is_column_used(&self, column: &str) -> bool {
        self.mapping.field_for_column(column).is_some()
    }

    /// Source columns not bound to any field.
    pub fn available_columns(&self) -> Vec<&str> {
        let used: HashSet<&str> = self.mapping.iter().map(|(_, column)| column).collect();
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|column| !used.contains(column))
            .collect()
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let fields = self.registry.list_fields();
        MappingSummary {
            total_fields: fields.len(),
            mapped: fields
                .iter()
                .filter(|field| self.mapping.is_bound(field.key))
                .count(),
            required_total: self.registry.required_fields().count(),
            required_mapped: self
                .registry
                .required_fields()
                .filter(|field| self.mapping.is_bound(field.key))
                .count(),
        }
    }

    /// Project the table rows through the current mapping.
    pub fn project(&self, table: &SourceTable) -> Vec<MappedRecord> {
        project(table, &self.mapping)
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Total number of fields in the registry.
    pub total_fields: usize,
    /// Fields with a binding.
    pub mapped: usize,
    /// Total required fields.
    pub required_total: usize,
    /// Required fields that are mapped.
    pub required_mapped: usize,
}

/// Transform each raw row into a record keyed by canonical field.
///
/// Every canonical field is present in the output. A field whose column is
/// unbound, missing from the header, or beyond the end of a short row gets an
/// empty string.
pub fn project(table: &SourceTable, mapping: &ColumnMapping) -> Vec<MappedRecord> {
    let indices: Vec<(FieldKey, Option<usize>)> = FieldKey::ALL
        .into_iter()
        .map(|field| {
            let index = mapping
                .get(field)
                .and_then(|column| table.column_index(column));
            (field, index)
        })
        .collect();

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut record = MappedRecord::new(row_index);
            for (field, index) in &indices {
                let value = index.and_then(|i| row.get(i)).unwrap_or("");
                record.set(*field, value);
            }
            record
        })
        .collect()
}
