//! Parsing of `--map FIELD=COLUMN` overrides.

use roster_model::FieldKey;

/// Parse `FIELD=COLUMN`, e.g. `parent_phone=Guardian Mobile`.
///
/// The field accepts its key or label in any case. An empty column is kept
/// and later clears the binding.
pub fn parse_field_binding(raw: &str) -> Result<(FieldKey, String), String> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=COLUMN, got '{raw}'"))?;
    let field = field
        .parse::<FieldKey>()
        .map_err(|error| format!("{error}"))?;
    Ok((field, column.trim().to_string()))
}
