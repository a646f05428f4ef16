//! Error types for the import wizard and committer.

use std::path::PathBuf;

use roster_ingest::IngestError;
use roster_map::MappingError;
use roster_model::FieldKey;
use roster_validate::RulesError;
use thiserror::Error;

use crate::session::WizardStep;

/// Failure reported by a bulk-create backend for a whole batch.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("backend rejected batch: {0}")]
    Rejected(String),

    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode records: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons the wizard refuses an action. The session never advances on error.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Upload rejected by extension.
    #[error("unsupported file type: {file_name} (expected .xlsx, .xls or .csv)")]
    UnsupportedFileType { file_name: String },

    /// Upload accepted by extension but could not be decoded.
    #[error(transparent)]
    Ingest(IngestError),

    /// Required fields are not bound.
    #[error("mapping incomplete; unmapped required fields: {}", join_fields(.missing))]
    IncompleteMapping { missing: Vec<FieldKey> },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Review found issues.
    #[error("{count} validation issue(s) must be fixed before import")]
    ValidationFailed { count: usize },

    #[error("cannot {action} from the {step} step")]
    WrongStep {
        action: &'static str,
        step: WizardStep,
    },

    #[error("an import is still running")]
    ImportInProgress,

    #[error("no file has been uploaded")]
    NoSession,
}

impl From<IngestError> for WizardError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::UnsupportedFileType { path, .. } => Self::UnsupportedFileType {
                file_name: path.display().to_string(),
            },
            other => Self::Ingest(other),
        }
    }
}

fn join_fields(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors loading import settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML settings {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {message}")]
    Invalid { message: String },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_mapping_lists_fields() {
        let err = WizardError::IncompleteMapping {
            missing: vec![FieldKey::Gender, FieldKey::ParentPhone],
        };
        assert_eq!(
            err.to_string(),
            "mapping incomplete; unmapped required fields: gender, parent_phone"
        );
    }

    #[test]
    fn unsupported_ingest_error_becomes_wizard_variant() {
        let err: WizardError = IngestError::UnsupportedFileType {
            path: PathBuf::from("roster.pdf"),
            extension: "pdf".to_string(),
        }
        .into();
        assert!(matches!(err, WizardError::UnsupportedFileType { file_name } if file_name == "roster.pdf"));
    }
}
