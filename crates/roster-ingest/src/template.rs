//! Downloadable import template.
//!
//! The template header row is the field labels in registry order, so a file
//! built from it auto-maps every field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use roster_model::ImportField;
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::file_kind::FileKind;

/// Template header labels in registry order.
pub fn template_headers(fields: &[ImportField]) -> Vec<&'static str> {
    fields.iter().map(|field| field.label).collect()
}

/// Template as CSV text (header row only).
///
/// # Errors
///
/// Returns [`IngestError::TemplateEncode`] if the header row cannot be encoded.
pub fn template_csv(fields: &[ImportField]) -> Result<String> {
    let encode_error = |message: String| IngestError::TemplateEncode { message };
    let bytes = write_csv_header(Vec::new(), fields).map_err(|e| encode_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| encode_error(e.to_string()))
}

fn write_csv_header<W: Write>(writer: W, fields: &[ImportField]) -> csv::Result<W> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(template_headers(fields))?;
    writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))
}

/// Write the template to `path` as `.csv` or `.xlsx`.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFileType`] for `.xls` and other
/// extensions, or [`IngestError::Template`] if writing fails.
pub fn write_template(path: &Path, fields: &[ImportField]) -> Result<()> {
    let template_error = |message: String| IngestError::Template {
        path: path.to_path_buf(),
        message,
    };
    match FileKind::from_path(path)? {
        FileKind::Csv => {
            let file = File::create(path).map_err(|e| template_error(e.to_string()))?;
            let mut writer = write_csv_header(BufWriter::new(file), fields)
                .map_err(|e| template_error(e.to_string()))?;
            writer.flush().map_err(|e| template_error(e.to_string()))?;
        }
        FileKind::Xlsx => {
            let mut workbook = Workbook::new();
            let header_format = Format::new().set_bold();
            let worksheet = workbook.add_worksheet();
            for (col, label) in template_headers(fields).into_iter().enumerate() {
                let col = u16::try_from(col)
                    .map_err(|_| template_error(format!("too many columns ({})", fields.len())))?;
                worksheet
                    .write_string_with_format(0, col, label, &header_format)
                    .map_err(|e| template_error(e.to_string()))?;
            }
            workbook
                .save(path)
                .map_err(|e| template_error(e.to_string()))?;
        }
        FileKind::Xls => {
            return Err(IngestError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension: "xls".to_string(),
            });
        }
    }
    info!(path = %path.display(), fields = fields.len(), "wrote import template");
    Ok(())
}
