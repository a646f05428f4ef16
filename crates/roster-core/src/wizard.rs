//! Four-step import wizard: upload, map, review, import.

use std::path::Path;

use roster_ingest::{FileKind, read_source_table};
use roster_map::{ColumnMapper, SchemaRegistry};
use roster_model::{CommitTally, FieldKey, ImportProgress, SourceTable};
use roster_validate::{ValidationRules, validate};
use tracing::{debug, info, warn};

use crate::commit::{BulkCreate, CancelToken, CommitOptions, CommitStream, commit};
use crate::error::WizardError;
use crate::session::{ImportSession, WizardStep};

/// Owns the single import session and gates every transition.
#[derive(Debug, Clone)]
pub struct ImportWizard {
    registry: SchemaRegistry,
    rules: ValidationRules,
    options: CommitOptions,
    step: WizardStep,
    session: Option<ImportSession>,
}

impl ImportWizard {
    pub fn new(registry: SchemaRegistry, rules: ValidationRules) -> Self {
        Self {
            registry,
            rules,
            options: CommitOptions::default(),
            step: WizardStep::Upload,
            session: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CommitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn session(&self) -> Option<&ImportSession> {
        self.session.as_ref()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn options(&self) -> CommitOptions {
        self.options
    }

    /// Read and accept the file at `path`.
    ///
    /// # Errors
    ///
    /// Refused outside the upload step. Unsupported extensions and unreadable
    /// files leave the wizard where it was.
    pub fn load_file(&mut self, path: &Path) -> Result<(), WizardError> {
        self.require_step(WizardStep::Upload, "upload a file")?;
        let table = read_source_table(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.accept_file(&file_name, table)
    }

    /// Start a session for an already decoded file and suggest a mapping.
    ///
    /// # Errors
    ///
    /// [`WizardError::UnsupportedFileType`] unless `file_name` ends in
    /// `.xlsx`, `.xls` or `.csv`.
    pub fn accept_file(&mut self, file_name: &str, table: SourceTable) -> Result<(), WizardError> {
        self.require_step(WizardStep::Upload, "upload a file")?;
        if FileKind::from_path(Path::new(file_name)).is_err() {
            warn!(file_name, "rejected upload: unsupported file type");
            return Err(WizardError::UnsupportedFileType {
                file_name: file_name.to_string(),
            });
        }

        let mapper = ColumnMapper::suggested(self.registry.clone(), table.headers.clone());
        let summary = mapper.summary();
        info!(
            file_name,
            columns = table.headers.len(),
            rows = table.row_count(),
            suggested = summary.mapped,
            "file accepted"
        );
        self.session = Some(ImportSession::new(file_name.to_string(), table, mapper));
        self.step = WizardStep::Map;
        Ok(())
    }

    /// Bind `field` to `column` in the map step.
    ///
    /// # Errors
    ///
    /// Refused outside the map step, for unknown columns, and for columns
    /// bound to another field.
    pub fn set_mapping(&mut self, field: FieldKey, column: &str) -> Result<(), WizardError> {
        self.require_step(WizardStep::Map, "change the mapping")?;
        let session = self.session.as_mut().ok_or(WizardError::NoSession)?;
        session.mapper.set_mapping(field, column)?;
        Ok(())
    }

    /// Unbind `field`; returns whether it was bound.
    pub fn clear_mapping(&mut self, field: FieldKey) -> Result<bool, WizardError> {
        self.require_step(WizardStep::Map, "change the mapping")?;
        let session = self.session.as_mut().ok_or(WizardError::NoSession)?;
        Ok(session.mapper.clear_mapping(field))
    }

    /// Move forward one step.
    ///
    /// Upload to map needs a session. Map to review needs a complete mapping
    /// and runs projection and validation. Review to import goes through
    /// [`Self::start_import`] instead.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Upload => {
                if self.session.is_none() {
                    return Err(WizardError::NoSession);
                }
                self.step = WizardStep::Map;
            }
            WizardStep::Map => {
                let session = self.session.as_mut().ok_or(WizardError::NoSession)?;
                if !session.mapper.is_complete() {
                    let missing = session.mapper.missing_required();
                    debug!(?missing, "mapping incomplete");
                    return Err(WizardError::IncompleteMapping { missing });
                }
                session.records = session.mapper.project(&session.table);
                session.issues = validate(
                    session.mapper.registry().list_fields(),
                    &session.records,
                    &self.rules,
                );
                info!(
                    records = session.records.len(),
                    issues = session.issues.len(),
                    "review ready"
                );
                self.step = WizardStep::Review;
            }
            WizardStep::Review => {
                let count = self.session.as_ref().map_or(0, |s| s.issues.len());
                if count > 0 {
                    return Err(WizardError::ValidationFailed { count });
                }
                return Err(WizardError::WrongStep {
                    action: "advance without a backend",
                    step: self.step,
                });
            }
            WizardStep::Import => {
                return Err(WizardError::WrongStep {
                    action: "advance",
                    step: self.step,
                });
            }
        }
        Ok(self.step)
    }

    /// Begin committing the reviewed records to `backend`.
    ///
    /// The returned run borrows the wizard, so no other transition can
    /// happen until it is finished or dropped.
    ///
    /// # Errors
    ///
    /// Refused outside the review step and while validation issues remain.
    pub fn start_import<'w>(
        &'w mut self,
        backend: &'w mut dyn BulkCreate,
    ) -> Result<ImportRun<'w>, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::WrongStep {
                action: "start an import",
                step: self.step,
            });
        }
        let options = self.options;
        let Some(session) = self.session.as_mut() else {
            return Err(WizardError::NoSession);
        };
        if !session.issues.is_empty() {
            return Err(WizardError::ValidationFailed {
                count: session.issues.len(),
            });
        }

        let records = session.records.clone();
        session.progress = Some(ImportProgress::start(records.len()));
        session.tally = None;
        self.step = WizardStep::Import;
        info!(
            records = records.len(),
            batch_size = options.batch_size,
            "import started"
        );

        let stream = commit(records, backend, options, CancelToken::never());
        Ok(ImportRun { session, stream })
    }

    /// Move back one step. Nothing is cleared.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.step = match self.step {
            WizardStep::Map => WizardStep::Upload,
            WizardStep::Review => WizardStep::Map,
            WizardStep::Import if self.import_in_flight() => {
                return Err(WizardError::ImportInProgress);
            }
            step @ (WizardStep::Upload | WizardStep::Import) => {
                return Err(WizardError::WrongStep {
                    action: "go back",
                    step,
                });
            }
        };
        Ok(self.step)
    }

    /// Finish a completed import and return to upload with no session.
    pub fn import_more(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Import {
            return Err(WizardError::WrongStep {
                action: "import more",
                step: self.step,
            });
        }
        self.reset()
    }

    /// Discard the session from any step and return to upload.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.import_in_flight() {
            return Err(WizardError::ImportInProgress);
        }
        debug!(step = %self.step, "session discarded");
        self.session = None;
        self.step = WizardStep::Upload;
        Ok(())
    }

    fn import_in_flight(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(ImportSession::import_in_flight)
    }

    fn require_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                action,
                step: self.step,
            })
        }
    }
}

/// A commit in progress. Each `next` commits one batch and records the
/// progress on the session; dropping the run commits whatever is left.
pub struct ImportRun<'w> {
    session: &'w mut ImportSession,
    stream: CommitStream<'w>,
}

impl ImportRun<'_> {
    pub fn total(&self) -> usize {
        self.stream.total()
    }

    /// Last progress recorded on the session.
    pub fn progress(&self) -> Option<ImportProgress> {
        self.session.progress
    }

    /// Commit the remaining batches and return the final tally.
    pub fn finish(mut self) -> CommitTally {
        for _ in self.by_ref() {}
        self.stream.tally().clone()
    }
}

impl Iterator for ImportRun<'_> {
    type Item = ImportProgress;

    fn next(&mut self) -> Option<Self::Item> {
        let progress = self.stream.next()?;
        self.session.progress = Some(progress);
        if self.stream.is_finished() {
            let tally = self.stream.tally().clone();
            info!(
                succeeded = tally.succeeded,
                failed = tally.failed,
                "import finished"
            );
            self.session.tally = Some(tally);
        }
        Some(progress)
    }
}

impl std::iter::FusedIterator for ImportRun<'_> {}

impl Drop for ImportRun<'_> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
