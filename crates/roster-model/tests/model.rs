use roster_model::{
    ColumnMapping, FieldKey, ImportProgress, IssueKind, MappedRecord, RawRow, SourceTable,
    ValidationIssue,
};

#[test]
fn progress_percent_is_floored_and_clamped() {
    assert_eq!(ImportProgress::new(0, 3).percent, 0);
    assert_eq!(ImportProgress::new(1, 3).percent, 33);
    assert_eq!(ImportProgress::new(3, 3).percent, 100);
    assert_eq!(ImportProgress::new(5, 3).processed, 3);
    assert!(ImportProgress::new(0, 0).is_complete());
    assert!(!ImportProgress::start(0).is_complete());
}

#[test]
fn mapping_tracks_bound_columns() {
    let mut mapping = ColumnMapping::new();
    assert_eq!(mapping.bind(FieldKey::Name, "Student Name"), None);
    assert_eq!(
        mapping.bind(FieldKey::Name, "Full Name"),
        Some("Student Name".to_string())
    );
    mapping.bind(FieldKey::Gender, "  ");

    assert!(mapping.is_bound(FieldKey::Name));
    assert!(!mapping.is_bound(FieldKey::Gender));
    assert_eq!(mapping.field_for_column("Full Name"), Some(FieldKey::Name));
    assert_eq!(mapping.field_for_column("Student Name"), None);

    let order: Vec<FieldKey> = mapping.iter().map(|(field, _)| field).collect();
    assert_eq!(order, vec![FieldKey::Name, FieldKey::Gender]);
}

#[test]
fn source_table_looks_up_cells_by_header() {
    let table = SourceTable::new(
        vec!["Name".to_string(), "Class".to_string()],
        vec![RawRow::from(vec!["Okello".to_string()])],
    );
    let row = &table.rows[0];
    assert_eq!(table.cell(row, "Name"), Some("Okello"));
    assert_eq!(table.cell(row, "Class"), None);
    assert_eq!(table.cell(row, "Phone"), None);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn record_reads_missing_fields_as_empty() {
    let record = MappedRecord::new(0).with(FieldKey::Class, "P5");
    assert_eq!(record.get(FieldKey::Class), "P5");
    assert_eq!(record.get(FieldKey::Name), "");
}

#[test]
fn issue_reports_sheet_row() {
    let issue = ValidationIssue::new(0, FieldKey::Name, IssueKind::MissingValue, "Name is required");
    assert_eq!(issue.sheet_row(), 2);
    assert_eq!(issue.kind.to_string(), "Missing value");
}
