//! Integration tests for the headless import pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use roster_cli::pipeline::{ImportInput, run_import};
use roster_core::WizardError;
use roster_model::{FieldKey, IssueKind};
use tempfile::TempDir;

const VALID_CSV: &str = "\
Student Name,Sex,Grade,Guardian_Phone
Amina Nakato,Female,P5,256701234567
Brian Okello,Male,P6,+256772000111
Cissy Auma,Female,S1,0772123456
";

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("import.toml");
        fs::write(&config, "[commit]\nbatch_size = 2\n").expect("write settings");
        Self { dir, config }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write roster");
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn input<'a>(&'a self, file: &'a Path) -> ImportInput<'a> {
        ImportInput {
            config: Some(&self.config),
            ..ImportInput::new(file)
        }
    }
}

#[test]
fn invalid_rows_block_the_import() {
    let workspace = Workspace::new();
    let file = workspace.file(
        "roster.csv",
        "Student Name,Sex,Grade,Guardian_Phone\n\
         Amina Nakato,Female,P5,256701234567\n\
         Brian Okello,Unknown,P6,256772000111\n",
    );
    let output = workspace.path("students.csv");

    let outcome = run_import(ImportInput {
        output: Some(&output),
        ..workspace.input(&file)
    })
    .expect("run import");

    assert!(outcome.has_errors());
    assert!(outcome.tally.is_none());
    assert_eq!(outcome.rows, 2);
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].field, FieldKey::Gender);
    assert_eq!(outcome.issues[0].kind, IssueKind::InvalidEnum);
    assert!(!output.exists());
}

#[test]
fn dry_run_validates_without_committing() {
    let workspace = Workspace::new();
    let file = workspace.file("roster.csv", VALID_CSV);
    let output = workspace.path("students.csv");

    let outcome = run_import(ImportInput {
        output: Some(&output),
        dry_run: true,
        ..workspace.input(&file)
    })
    .expect("run import");

    assert!(!outcome.has_errors());
    assert!(outcome.dry_run);
    assert!(outcome.tally.is_none());
    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.file_name, "roster.csv");
    assert!(!output.exists());
}

#[test]
fn empty_map_override_clears_the_suggestion() {
    let workspace = Workspace::new();
    let file = workspace.file("roster.csv", VALID_CSV);
    let map = [(FieldKey::Class, String::new())];

    let err = run_import(ImportInput {
        map: &map,
        ..workspace.input(&file)
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("review mapping"));
    assert!(matches!(
        err.downcast_ref::<WizardError>(),
        Some(WizardError::IncompleteMapping { missing }) if missing == &[FieldKey::Class]
    ));
}

#[test]
fn map_override_binds_an_unrecognised_column() {
    let workspace = Workspace::new();
    let file = workspace.file(
        "roster.csv",
        "Pupil,Sex,Grade,Guardian_Phone\nAmina Nakato,Female,P5,256701234567\n",
    );
    let map = [(FieldKey::Name, "Pupil".to_string())];

    let outcome = run_import(ImportInput {
        map: &map,
        ..workspace.input(&file)
    })
    .expect("run import");

    assert_eq!(outcome.mapping.get(FieldKey::Name), Some("Pupil"));
    assert!(outcome.unmapped.is_empty());
    let tally = outcome.tally.expect("tally");
    assert_eq!(tally.succeeded, 1);
    assert!(!tally.has_failures());
}

#[test]
fn output_file_receives_committed_students() {
    let workspace = Workspace::new();
    let file = workspace.file("roster.csv", VALID_CSV);
    let output = workspace.path("students.csv");

    let outcome = run_import(ImportInput {
        output: Some(&output),
        ..workspace.input(&file)
    })
    .expect("run import");

    assert!(!outcome.has_errors());
    assert_eq!(outcome.output.as_deref(), Some(output.as_path()));
    let tally = outcome.tally.expect("tally");
    assert_eq!(tally.succeeded, 3);
    assert_eq!(tally.failed, 0);

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(
        written,
        "name,gender,class,parent_phone\n\
         Amina Nakato,Female,P5,256701234567\n\
         Brian Okello,Male,P6,+256772000111\n\
         Cissy Auma,Female,S1,0772123456\n"
    );
}

#[test]
fn duplicate_rows_fail_without_blocking_the_rest() {
    let workspace = Workspace::new();
    let file = workspace.file(
        "roster.csv",
        "Student Name,Sex,Grade,Guardian_Phone\n\
         Amina Nakato,Female,P5,256701234567\n\
         AMINA NAKATO,Female,p5,256701234567\n\
         Brian Okello,Male,P6,256772000111\n",
    );

    let outcome = run_import(workspace.input(&file)).expect("run import");

    assert!(outcome.has_errors());
    let tally = outcome.tally.expect("tally");
    assert_eq!(tally.succeeded, 2);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.failures[0].row_index, 1);
}
