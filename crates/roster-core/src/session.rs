//! The single in-flight import session.

use std::fmt;

use roster_map::ColumnMapper;
use roster_model::{
    ColumnMapping, CommitTally, ImportProgress, MappedRecord, SourceTable, ValidationIssue,
};

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Upload,
    Map,
    Review,
    Import,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Map => "map",
            Self::Review => "review",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of one file from upload through commit.
#[derive(Debug, Clone)]
pub struct ImportSession {
    pub(crate) file_name: String,
    pub(crate) table: SourceTable,
    pub(crate) mapper: ColumnMapper,
    pub(crate) records: Vec<MappedRecord>,
    pub(crate) issues: Vec<ValidationIssue>,
    pub(crate) progress: Option<ImportProgress>,
    pub(crate) tally: Option<CommitTally>,
}

impl ImportSession {
    pub(crate) fn new(file_name: String, table: SourceTable, mapper: ColumnMapper) -> Self {
        Self {
            file_name,
            table,
            mapper,
            records: Vec::new(),
            issues: Vec::new(),
            progress: None,
            tally: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn table(&self) -> &SourceTable {
        &self.table
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn mapper(&self) -> &ColumnMapper {
        &self.mapper
    }

    pub fn mapping(&self) -> &ColumnMapping {
        self.mapper.mapping()
    }

    /// Records from the last projection (set on entering review).
    pub fn records(&self) -> &[MappedRecord] {
        &self.records
    }

    /// Issues from the last validation run.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Commit progress; `None` before import starts.
    pub fn progress(&self) -> Option<ImportProgress> {
        self.progress
    }

    /// Final tally; `None` until the commit completes.
    pub fn tally(&self) -> Option<&CommitTally> {
        self.tally.as_ref()
    }

    /// True while a commit has started and not reached 100%.
    pub fn import_in_flight(&self) -> bool {
        self.progress.is_some_and(|progress| !progress.is_complete())
    }
}
