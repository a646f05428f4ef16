//! Validation issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Reason a mapped value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Required value is empty.
    MissingValue,
    /// Value is not one of the allowed choices.
    InvalidEnum,
    /// Value does not exist in the referenced registry.
    UnknownReference,
    /// Value does not have the expected shape.
    InvalidFormat,
}

impl IssueKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingValue => "Missing value",
            Self::InvalidEnum => "Invalid choice",
            Self::UnknownReference => "Unknown reference",
            Self::InvalidFormat => "Invalid format",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single (row, field, reason) failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Zero-based data row index.
    pub row_index: usize,
    pub field: FieldKey,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(row_index: usize, field: FieldKey, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            row_index,
            field,
            kind,
            message: message.into(),
        }
    }

    /// Row number as a spreadsheet user sees it (header is row 1).
    pub fn sheet_row(&self) -> usize {
        self.row_index + 2
    }
}
