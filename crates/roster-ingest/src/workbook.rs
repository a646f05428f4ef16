//! Excel decoding through `calamine`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use roster_model::SourceTable;
use tracing::debug;

use crate::csv_table::{build_table, normalize_cell};
use crate::error::{IngestError, Result};

/// Render a cell as text.
///
/// Whole-number floats lose their decimal part so phone numbers stored as
/// numbers come back as digits.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => normalize_cell(s),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => format_float(d.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Read the first worksheet of an `.xlsx` or `.xls` file.
pub fn read_workbook_table(path: &Path) -> Result<SourceTable> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let raw_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    let table = build_table(raw_rows).ok_or_else(|| IngestError::EmptyFile {
        path: path.to_path_buf(),
    })?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "decoded workbook"
    );
    Ok(table)
}
