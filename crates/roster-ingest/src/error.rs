//! Error types for roster file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while accepting or decoding an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Acquisition Errors ===
    /// File extension is not one of the accepted spreadsheet formats.
    #[error("unsupported file type '{extension}' for {path} (expected .xlsx, .xls or .csv)")]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// File has no header row.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    // === Template Errors ===
    /// Failed to write the import template.
    #[error("failed to write template {path}: {message}")]
    Template { path: PathBuf, message: String },

    /// Failed to encode the template header row in memory.
    #[error("failed to encode template: {message}")]
    TemplateEncode { message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
