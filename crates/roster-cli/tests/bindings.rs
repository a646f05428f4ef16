use insta::assert_snapshot;
use roster_cli::bindings::parse_field_binding;
use roster_cli::logging::{LogConfig, LogFormat, default_directives};
use roster_model::FieldKey;
use tracing::level_filters::LevelFilter;

#[test]
fn parses_key_and_column() {
    assert_eq!(
        parse_field_binding("parent_phone=Guardian Mobile").unwrap(),
        (FieldKey::ParentPhone, "Guardian Mobile".to_string())
    );
}

#[test]
fn accepts_spaced_field_names_in_any_case() {
    let (field, column) = parse_field_binding("Parent Phone = Tel ").unwrap();
    assert_eq!(field, FieldKey::ParentPhone);
    assert_eq!(column, "Tel");
}

#[test]
fn keeps_equals_signs_in_column() {
    let (_, column) = parse_field_binding("name=Name=Full").unwrap();
    assert_eq!(column, "Name=Full");
}

#[test]
fn empty_column_is_allowed() {
    assert_eq!(
        parse_field_binding("class=").unwrap(),
        (FieldKey::Class, String::new())
    );
}

#[test]
fn missing_separator_is_reported() {
    assert_snapshot!(
        parse_field_binding("gender").unwrap_err(),
        @"expected FIELD=COLUMN, got 'gender'"
    );
}

#[test]
fn unknown_field_is_reported() {
    assert_snapshot!(
        parse_field_binding("stream=Class").unwrap_err(),
        @"unknown import field: stream"
    );
}

#[test]
fn log_config_builders_apply() {
    let config = LogConfig::default()
        .with_level_filter(LevelFilter::INFO)
        .with_format(LogFormat::Json)
        .with_log_data(true);
    assert_eq!(config.level_filter, LevelFilter::INFO);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.log_data);
    assert!(default_directives(config.level_filter).contains("roster_cli=info"));
}
