//! Roster import wizard.
//!
//! Drives one uploaded file through mapping, review and a batched commit.

#![deny(unsafe_code)]

pub mod backend;
pub mod commit;
pub mod error;
pub mod session;
pub mod settings;
pub mod wizard;

pub use backend::{CsvSink, InMemoryStore};
pub use commit::{
    BulkCreate, BulkCreateRequest, BulkCreateResponse, BulkError, CancelToken, CommitOptions,
    CommitStream, DEFAULT_BATCH_SIZE, UNLISTED_FAILURE, commit,
};
pub use error::{CommitError, SettingsError, WizardError};
pub use session::{ImportSession, WizardStep};
pub use settings::{
    CONFIG_ENV_VAR, DEFAULT_CLASSES, ImportSettings, load_settings, resolve_settings_path,
};
pub use wizard::{ImportRun, ImportWizard};
