use std::collections::{BTreeMap, BTreeSet};

use roster_model::{FieldKey, IssueKind, ValidationIssue};
use serde::Serialize;

/// Issue counts for the review step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub total: usize,
    pub by_field: BTreeMap<FieldKey, usize>,
    pub by_kind: BTreeMap<IssueKind, usize>,
    /// Zero-based indices of rows with at least one issue.
    pub rows: BTreeSet<usize>,
}

impl IssueSummary {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut summary = Self {
            total: issues.len(),
            ..Self::default()
        };
        for issue in issues {
            *summary.by_field.entry(issue.field).or_insert(0) += 1;
            *summary.by_kind.entry(issue.kind).or_insert(0) += 1;
            summary.rows.insert(issue.row_index);
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    pub fn affected_rows(&self) -> usize {
        self.rows.len()
    }
}
