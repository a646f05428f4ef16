//! Row validator.
//!
//! Runs the rule attached to each field against every mapped record. The
//! result is ordered by row, then by field declaration order, and depends
//! only on the inputs.

use roster_model::{FieldRule, ImportField, IssueKind, MappedRecord, ValidationIssue};
use tracing::{debug, info};

use crate::rules::ValidationRules;

/// Validator bound to a field list and a rule set.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    fields: &'a [ImportField],
    rules: &'a ValidationRules,
}

impl<'a> RowValidator<'a> {
    pub fn new(fields: &'a [ImportField], rules: &'a ValidationRules) -> Self {
        Self { fields, rules }
    }

    /// Validate all records.
    pub fn validate(&self, records: &[MappedRecord]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for record in records {
            for field in self.fields {
                if let Some(issue) = self.check_field(record, field) {
                    debug!(
                        row = record.row_index,
                        field = %issue.field,
                        kind = ?issue.kind,
                        "validation issue"
                    );
                    issues.push(issue);
                }
            }
        }
        info!(records = records.len(), issues = issues.len(), "validation complete");
        issues
    }

    fn check_field(&self, record: &MappedRecord, field: &ImportField) -> Option<ValidationIssue> {
        let value = record.get(field.key).trim();
        if value.is_empty() && !field.required {
            return None;
        }
        let issue = |kind: IssueKind, message: String| {
            Some(ValidationIssue::new(record.row_index, field.key, kind, message))
        };
        match field.rule {
            FieldRule::Text => {
                if value.is_empty() {
                    return issue(IssueKind::MissingValue, format!("{} is required", field.label));
                }
            }
            FieldRule::Enum => {
                let allowed = self.rules.choices(field.key);
                if !allowed.is_some_and(|set| set.contains(value)) {
                    let expected = allowed
                        .map(|set| set.values().collect::<Vec<_>>().join(", "))
                        .unwrap_or_default();
                    let message = if value.is_empty() {
                        format!("{} is missing; expected one of: {expected}", field.label)
                    } else {
                        format!("{} '{value}' is not one of: {expected}", field.label)
                    };
                    return issue(IssueKind::InvalidEnum, message);
                }
            }
            FieldRule::Reference => {
                if !self.rules.classes().contains(value) {
                    let message = if value.is_empty() {
                        format!("{} is missing", field.label)
                    } else {
                        format!("{} '{value}' does not exist for this school", field.label)
                    };
                    return issue(IssueKind::UnknownReference, message);
                }
            }
            FieldRule::Phone => {
                if !self.rules.phone().is_match(value) {
                    let message = if value.is_empty() {
                        format!("{} is missing", field.label)
                    } else {
                        format!("{} '{value}' is not a valid phone number", field.label)
                    };
                    return issue(IssueKind::InvalidFormat, message);
                }
            }
        }
        None
    }
}

/// Validate `records` against `fields` with `rules`.
pub fn validate(
    fields: &[ImportField],
    records: &[MappedRecord],
    rules: &ValidationRules,
) -> Vec<ValidationIssue> {
    RowValidator::new(fields, rules).validate(records)
}
