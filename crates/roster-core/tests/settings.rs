use std::fs;
use std::path::Path;

use roster_core::{DEFAULT_CLASSES, ImportSettings, SettingsError, load_settings};
use roster_model::{FieldKey, MappedRecord};
use roster_validate::validate;

fn parse(text: &str) -> Result<ImportSettings, SettingsError> {
    ImportSettings::from_toml_str(text, Path::new("import.toml"))
}

#[test]
fn empty_file_uses_defaults() {
    let settings = parse("").unwrap();
    assert_eq!(settings, ImportSettings::default());
    assert_eq!(settings.validation.classes.len(), DEFAULT_CLASSES.len());
    assert_eq!(settings.commit.batch_size, 25);
}

#[test]
fn partial_settings_keep_other_defaults() {
    let settings = parse(
        r#"
[validation]
classes = ["Baby", "Middle", "Top"]

[commit]
batch_size = 10
"#,
    )
    .unwrap();
    assert_eq!(settings.validation.classes, vec!["Baby", "Middle", "Top"]);
    assert_eq!(settings.validation.genders, vec!["Male", "Female", "M", "F"]);
    assert_eq!(settings.commit_options().unwrap().batch_size, 10);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = parse("[validation]\ngrades = []\n").unwrap_err();
    assert!(matches!(err, SettingsError::Toml { .. }));
    assert!(err.to_string().contains("import.toml"));
}

#[test]
fn zero_batch_size_is_invalid() {
    let settings = parse("[commit]\nbatch_size = 0\n").unwrap();
    assert!(matches!(
        settings.commit_options(),
        Err(SettingsError::Invalid { .. })
    ));
    assert!(settings.wizard().is_err());
}

#[test]
fn bad_phone_pattern_is_reported() {
    let settings = parse("[validation]\nphone_pattern = '^[0-9'\n").unwrap();
    assert!(matches!(
        settings.validation_rules(),
        Err(SettingsError::Rules(_))
    ));
}

#[test]
fn empty_gender_list_is_invalid() {
    let settings = parse("[validation]\ngenders = []\n").unwrap();
    assert!(matches!(
        settings.validation_rules(),
        Err(SettingsError::Invalid { .. })
    ));
}

#[test]
fn configured_rules_drive_validation() {
    let settings = parse(
        r#"
[validation]
genders = ["Girl", "Boy"]
phone_pattern = '^07[0-9]{8}$'
classes = ["Top"]
"#,
    )
    .unwrap();
    let rules = settings.validation_rules().unwrap();
    let wizard = settings.wizard().unwrap();
    let record = MappedRecord::new(0)
        .with(FieldKey::Name, "Amina")
        .with(FieldKey::Gender, "girl")
        .with(FieldKey::Class, "top")
        .with(FieldKey::ParentPhone, "0772123456");

    assert!(validate(wizard.registry().list_fields(), &[record.clone()], &rules).is_empty());

    let record = record.with(FieldKey::Gender, "Female");
    let issues = validate(wizard.registry().list_fields(), &[record], &rules);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FieldKey::Gender);
}

#[test]
fn classes_can_be_overridden() {
    let settings = ImportSettings::default().with_classes(vec!["Senior 1".to_string()]);
    let registry = settings.class_registry();
    assert!(registry.contains("senior 1"));
    assert!(!registry.contains("P1"));
}

#[test]
fn explicit_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.toml");
    fs::write(&path, "[commit]\nbatch_size = 5\n").unwrap();
    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.commit.batch_size, 5);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_settings(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
}
