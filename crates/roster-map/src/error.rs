//! Error types for mapping operations.

use std::fmt;

use roster_model::FieldKey;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Column not found in source data.
    ColumnNotFound(String),
    /// Column already mapped to another field.
    ColumnAlreadyUsed { column: String, field: FieldKey },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
            Self::ColumnAlreadyUsed { column, field } => {
                write!(f, "Column '{column}' already mapped to '{field}'")
            }
        }
    }
}

impl std::error::Error for MappingError {}
