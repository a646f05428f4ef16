//! Schema registry: the canonical fields and header auto-suggestion.

use std::collections::BTreeSet;

use roster_model::{ColumnMapping, FieldKey, FieldRule, ImportField};
use tracing::debug;

const STUDENT_FIELDS: [ImportField; 4] = [
    ImportField {
        key: FieldKey::Name,
        label: "Name",
        aliases: &[
            "name",
            "student name",
            "full name",
            "student",
            "learner name",
            "pupil name",
        ],
        required: true,
        rule: FieldRule::Text,
    },
    ImportField {
        key: FieldKey::Gender,
        label: "Gender",
        aliases: &["gender", "sex"],
        required: true,
        rule: FieldRule::Enum,
    },
    ImportField {
        key: FieldKey::Class,
        label: "Class",
        aliases: &["class", "grade", "class name", "stream", "level", "form"],
        required: true,
        rule: FieldRule::Reference,
    },
    ImportField {
        key: FieldKey::ParentPhone,
        label: "Parent Phone",
        aliases: &[
            "parent phone",
            "parent_phone",
            "guardian phone",
            "guardian_phone",
            "phone",
            "phone number",
            "parent contact",
            "guardian contact",
            "contact",
            "mobile",
        ],
        required: true,
        rule: FieldRule::Phone,
    },
];

/// Fixed set of canonical import fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    fields: Vec<ImportField>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::student_roster()
    }
}

impl SchemaRegistry {
    /// Registry with a custom field list. Field order is kept as given.
    pub fn new(fields: Vec<ImportField>) -> Self {
        Self { fields }
    }

    /// The student roster fields: name, gender, class, parent phone.
    pub fn student_roster() -> Self {
        Self::new(STUDENT_FIELDS.to_vec())
    }

    pub fn list_fields(&self) -> &[ImportField] {
        &self.fields
    }

    pub fn field(&self, key: FieldKey) -> Option<&ImportField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &ImportField> {
        self.fields.iter().filter(|field| field.required)
    }

    /// Suggest a mapping for the uploaded `headers`.
    ///
    /// Each field, in registry order, takes the first header (file order)
    /// matching one of its aliases. A header already taken by an earlier
    /// field is skipped, so the suggestion never binds one column twice.
    /// Fields with no match stay unbound.
    pub fn suggest_mapping(&self, headers: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        let mut taken: BTreeSet<&str> = BTreeSet::new();
        for field in &self.fields {
            let matched = headers
                .iter()
                .find(|header| !taken.contains(header.as_str()) && field.matches_header(header));
            match matched {
                Some(header) => {
                    taken.insert(header.as_str());
                    mapping.bind(field.key, header.clone());
                    debug!(field = %field.key, column = %header, "suggested mapping");
                }
                None => debug!(field = %field.key, "no matching column"),
            }
        }
        mapping
    }

    /// Headers not bound by `mapping`, in file order.
    pub fn unmapped_columns(&self, headers: &[String], mapping: &ColumnMapping) -> Vec<String> {
        headers
            .iter()
            .filter(|header| mapping.field_for_column(header).is_none())
            .cloned()
            .collect()
    }
}
