//! Upload extension gate.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Extensions accepted at upload, lowercase and without the dot.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Spreadsheet format of an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
    Xls,
}

impl FileKind {
    /// Classify a file by its extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFileType`] for any other extension,
    /// including a missing one.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            _ => Err(IngestError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }

    pub fn is_workbook(self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}
