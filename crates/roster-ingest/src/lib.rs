//! Roster file acquisition.
//!
//! Accepts `.csv`, `.xlsx` and `.xls` uploads and decodes them into a
//! [`SourceTable`]; anything else is rejected before any bytes are read.

#![deny(unsafe_code)]

pub mod csv_table;
pub mod error;
pub mod file_kind;
pub mod template;
pub mod workbook;

use std::path::Path;

use roster_model::SourceTable;
use tracing::{info, warn};

pub use csv_table::{read_csv_reader, read_csv_table};
pub use error::{IngestError, Result};
pub use file_kind::{ACCEPTED_EXTENSIONS, FileKind};
pub use template::{template_csv, template_headers, write_template};
pub use workbook::read_workbook_table;

/// Check the extension and decode the file at `path`.
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let kind = match FileKind::from_path(path) {
        Ok(kind) => kind,
        Err(error) => {
            warn!(path = %path.display(), "rejected upload: {error}");
            return Err(error);
        }
    };
    let table = if kind.is_workbook() {
        read_workbook_table(path)?
    } else {
        read_csv_table(path)?
    };
    info!(
        path = %path.display(),
        kind = kind.extension(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "file accepted"
    );
    Ok(table)
}
