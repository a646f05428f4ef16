//! Headless Upload, Map, Review and Import flow behind `drais-import import`.
//!
//! The wizard is driven the way the interactive flow would drive it: suggested
//! mapping, caller overrides, review, then a single commit. Validation issues
//! stop the flow before anything is sent.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use roster_core::{BulkCreate, CsvSink, ImportWizard, InMemoryStore, load_settings};
use roster_map::SchemaRegistry;
use roster_model::{ColumnMapping, CommitTally, FieldKey, ValidationIssue};
use tracing::{debug, info, info_span, warn};

use crate::logging::redact_value;

/// Inputs for [`run_import`].
#[derive(Debug, Clone, Copy)]
pub struct ImportInput<'a> {
    /// Roster file (.xlsx, .xls or .csv).
    pub file: &'a Path,
    /// Mapping overrides; an empty column clears the field.
    pub map: &'a [(FieldKey, String)],
    /// Replaces the configured class registry when not empty.
    pub classes: &'a [String],
    /// Write committed students here instead of the in-memory store.
    pub output: Option<&'a Path>,
    pub dry_run: bool,
    /// Settings file; falls back to the environment, then defaults.
    pub config: Option<&'a Path>,
}

impl<'a> ImportInput<'a> {
    pub fn new(file: &'a Path) -> Self {
        Self {
            file,
            map: &[],
            classes: &[],
            output: None,
            dry_run: false,
            config: None,
        }
    }
}

/// What an `import` run did, for the summary printer.
#[derive(Debug)]
pub struct ImportOutcome {
    pub file_name: String,
    pub rows: usize,
    pub registry: SchemaRegistry,
    pub mapping: ColumnMapping,
    pub unmapped: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    /// `None` when validation blocked the import or on a dry run.
    pub tally: Option<CommitTally>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl ImportOutcome {
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty() || self.tally.as_ref().is_some_and(CommitTally::has_failures)
    }
}

/// Run one import from upload to commit.
///
/// # Errors
///
/// Fails on unreadable settings or files, bad mapping overrides, an
/// incomplete mapping, or an output file that cannot be written. Validation
/// issues are not errors; they come back in [`ImportOutcome::issues`].
pub fn run_import(input: ImportInput<'_>) -> Result<ImportOutcome> {
    let span = info_span!("import", file = %input.file.display());
    let _guard = span.enter();

    let mut settings = load_settings(input.config).context("load settings")?;
    if !input.classes.is_empty() {
        settings = settings.with_classes(input.classes.to_vec());
    }
    let mut wizard = settings.wizard().context("configure import")?;

    wizard
        .load_file(input.file)
        .with_context(|| format!("upload {}", input.file.display()))?;
    for (field, column) in input.map {
        if column.is_empty() {
            wizard
                .clear_mapping(*field)
                .with_context(|| format!("clear {field}"))?;
        } else {
            wizard
                .set_mapping(*field, column)
                .with_context(|| format!("map {field} to '{column}'"))?;
        }
    }
    wizard
        .advance()
        .context("review mapping (use --map FIELD=COLUMN)")?;

    let mut outcome = snapshot(&wizard, &input);
    for issue in &outcome.issues {
        debug!(
            row = issue.sheet_row(),
            field = %issue.field,
            kind = %issue.kind,
            message = redact_value(&issue.message),
            "validation issue"
        );
    }
    if !outcome.issues.is_empty() {
        warn!(issues = outcome.issues.len(), "import blocked by validation");
        return Ok(outcome);
    }
    if input.dry_run {
        info!(rows = outcome.rows, "dry run; nothing committed");
        return Ok(outcome);
    }

    let bar = progress_bar(outcome.rows)?;
    let tally = match input.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut sink = CsvSink::new(BufWriter::new(file));
            let tally = commit_with(&mut wizard, &mut sink, &bar)?;
            let mut writer = sink
                .into_inner()
                .with_context(|| format!("write {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("write {}", path.display()))?;
            tally
        }
        None => {
            let mut store = InMemoryStore::new();
            let tally = commit_with(&mut wizard, &mut store, &bar)?;
            info!(students = store.len(), "committed to in-memory store");
            tally
        }
    };
    for failure in &tally.failures {
        debug!(
            row = failure.row_index + 2,
            reason = redact_value(&failure.message),
            "record not imported"
        );
    }
    wizard.import_more().context("close import session")?;
    outcome.tally = Some(tally);
    Ok(outcome)
}

fn snapshot(wizard: &ImportWizard, input: &ImportInput<'_>) -> ImportOutcome {
    let registry = wizard.registry().clone();
    let (file_name, rows, mapping, unmapped, issues) = match wizard.session() {
        Some(session) => (
            session.file_name().to_string(),
            session.table().row_count(),
            session.mapping().clone(),
            registry.unmapped_columns(session.headers(), session.mapping()),
            session.issues().to_vec(),
        ),
        None => (
            input.file.display().to_string(),
            0,
            ColumnMapping::new(),
            Vec::new(),
            Vec::new(),
        ),
    };
    ImportOutcome {
        file_name,
        rows,
        registry,
        mapping,
        unmapped,
        issues,
        tally: None,
        output: input.output.map(Path::to_path_buf),
        dry_run: input.dry_run,
    }
}

fn commit_with<B: BulkCreate>(
    wizard: &mut ImportWizard,
    backend: &mut B,
    bar: &ProgressBar,
) -> Result<CommitTally> {
    let mut run = wizard.start_import(backend).context("start import")?;
    for progress in run.by_ref() {
        bar.set_position(u64::from(progress.percent));
    }
    let tally = run.finish();
    bar.finish_and_clear();
    Ok(tally)
}

fn progress_bar(records: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .context("progress bar template")?
            .progress_chars("##-"),
    );
    bar.set_message(format!("{records} record(s)"));
    Ok(bar)
}
