use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use roster_model::{RawRow, SourceTable};
use tracing::debug;

use crate::error::{IngestError, Result};

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Make repeated header names unique by suffixing ` (2)`, ` (3)`, ...
pub(crate) fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        if header.is_empty() || !seen.contains(&header) {
            seen.push(header);
            continue;
        }
        let mut suffix = 2usize;
        let mut candidate = format!("{header} ({suffix})");
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{header} ({suffix})");
        }
        seen.push(candidate);
    }
    seen
}

/// Split non-blank raw rows into a header row and data rows.
///
/// Data rows keep their own length, truncated to the header width.
pub(crate) fn build_table(raw_rows: Vec<Vec<String>>) -> Option<SourceTable> {
    let mut rows = raw_rows
        .into_iter()
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()));
    let header_row = rows.next()?;
    let headers = dedupe_headers(header_row.iter().map(|value| normalize_header(value)).collect());
    let width = headers.len();
    let data = rows
        .map(|row| RawRow::new(row.into_iter().take(width).collect()))
        .collect();
    Some(SourceTable::new(headers, data))
}

/// Decode CSV text from any reader. `origin` only labels errors.
pub fn read_csv_reader<R: Read>(reader: R, origin: &Path) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::CsvParse {
            path: origin.to_path_buf(),
            message: error.to_string(),
        })?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    let table = build_table(raw_rows).ok_or_else(|| IngestError::EmptyFile {
        path: origin.to_path_buf(),
    })?;
    debug!(
        path = %origin.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "decoded csv"
    );
    Ok(table)
}

/// Read a CSV file into a [`SourceTable`], using the first non-blank row as header.
pub fn read_csv_table(path: &Path) -> Result<SourceTable> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_reader(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_header_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff} Student   Name "), "Student Name");
        assert_eq!(normalize_cell("  P5\t"), "P5");
    }

    #[test]
    fn suffixes_duplicate_headers() {
        let headers = dedupe_headers(vec![
            "Phone".to_string(),
            "Phone".to_string(),
            String::new(),
            String::new(),
            "Phone".to_string(),
        ]);
        assert_eq!(headers, vec!["Phone", "Phone (2)", "", "", "Phone (3)"]);
    }
}
