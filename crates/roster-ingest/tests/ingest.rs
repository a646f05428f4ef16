use std::fs;
use std::path::{Path, PathBuf};

use roster_ingest::{
    IngestError, read_csv_reader, read_source_table, template_csv, template_headers,
    write_template,
};
use roster_map::SchemaRegistry;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_csv_with_blank_and_short_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        dir.path(),
        "roster.csv",
        "Student Name,Sex,Grade,Guardian_Phone\n\
         Amina Nakato,F,P5,256701234567\n\
         ,,,\n\
         Okello John,M\n",
    );
    let table = read_source_table(&path).expect("read csv");
    assert_eq!(
        table.headers,
        vec!["Student Name", "Sex", "Grade", "Guardian_Phone"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells, vec!["Amina Nakato", "F", "P5", "256701234567"]);
    assert_eq!(table.rows[1].cells, vec!["Okello John", "M"]);
}

#[test]
fn rejects_unsupported_extension_before_reading() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "roster.txt", "Name\nAmina\n");
    let err = read_source_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFileType { extension, .. } if extension == "txt"));
}

#[test]
fn empty_csv_is_an_error() {
    let err = read_csv_reader("\n , \n".as_bytes(), Path::new("empty.csv")).unwrap_err();
    assert!(matches!(err, IngestError::EmptyFile { .. }));
}

#[test]
fn extra_cells_beyond_header_are_dropped() {
    let table = read_csv_reader("Name,Class\nAmina,P5,extra\n".as_bytes(), Path::new("x.csv"))
        .expect("read csv");
    assert_eq!(table.rows[0].cells, vec!["Amina", "P5"]);
}

#[test]
fn template_header_matches_registry_labels() {
    let registry = SchemaRegistry::student_roster();
    assert_eq!(
        template_headers(registry.list_fields()),
        vec!["Name", "Gender", "Class", "Parent Phone"]
    );
    let csv = template_csv(registry.list_fields()).expect("encode template");
    insta::assert_snapshot!(csv.trim_end(), @"Name,Gender,Class,Parent Phone");
}

#[test]
fn csv_template_round_trips_through_reader() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.csv");
    let registry = SchemaRegistry::student_roster();
    write_template(&path, registry.list_fields()).expect("write template");
    let table = read_source_table(&path).expect("read template");
    assert_eq!(table.headers, vec!["Name", "Gender", "Class", "Parent Phone"]);
    assert!(table.rows.is_empty());
}

#[test]
fn xlsx_template_is_readable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.xlsx");
    let registry = SchemaRegistry::student_roster();
    write_template(&path, registry.list_fields()).expect("write template");
    let table = read_source_table(&path).expect("read template");
    assert_eq!(table.headers, vec!["Name", "Gender", "Class", "Parent Phone"]);
}

#[test]
fn oversized_xlsx_template_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.xlsx");
    let registry = SchemaRegistry::student_roster();
    let fields = vec![registry.list_fields()[0].clone(); 70_000];

    let err = write_template(&path, &fields).unwrap_err();
    assert!(matches!(err, IngestError::Template { .. }), "{err}");
    assert!(!path.exists());
}

#[test]
fn xls_template_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let registry = SchemaRegistry::student_roster();
    let err = write_template(&dir.path().join("template.xls"), registry.list_fields()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFileType { .. }));
}
