//! Bulk-create backends.

use std::collections::HashSet;
use std::io::Write;

use roster_model::{FieldKey, MappedRecord, fold_case};
use tracing::debug;

use crate::commit::{BulkCreate, BulkCreateRequest, BulkCreateResponse, BulkError};
use crate::error::CommitError;

/// In-memory student store.
///
/// Enforces that (name, class) is unique, ignoring case and surrounding
/// whitespace, both across batches and within one batch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    students: Vec<MappedRecord>,
    keys: HashSet<(String, String)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with existing students.
    pub fn with_existing(students: impl IntoIterator<Item = MappedRecord>) -> Self {
        let mut store = Self::new();
        for student in students {
            store.keys.insert(Self::key(&student));
            store.students.push(student);
        }
        store
    }

    pub fn students(&self) -> &[MappedRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn key(record: &MappedRecord) -> (String, String) {
        (
            fold_case(record.get(FieldKey::Name)),
            fold_case(record.get(FieldKey::Class)),
        )
    }
}

impl BulkCreate for InMemoryStore {
    fn bulk_create(
        &mut self,
        request: &BulkCreateRequest<'_>,
    ) -> Result<BulkCreateResponse, CommitError> {
        let mut response = BulkCreateResponse::default();
        for record in request.records {
            if self.keys.insert(Self::key(record)) {
                self.students.push(record.clone());
                response.succeeded += 1;
            } else {
                response.failed += 1;
                response.errors.push(BulkError {
                    row_index: record.row_index,
                    message: format!(
                        "a student with this name already exists in class {}",
                        record.get(FieldKey::Class).trim()
                    ),
                });
            }
        }
        Ok(response)
    }
}

/// Writes committed records as CSV with the field keys as header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
    written: usize,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            wrote_header: false,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> Result<W, CommitError> {
        self.writer
            .into_inner()
            .map_err(|error| CommitError::Io(error.into_error()))
    }
}

impl<W: Write> BulkCreate for CsvSink<W> {
    fn bulk_create(
        &mut self,
        request: &BulkCreateRequest<'_>,
    ) -> Result<BulkCreateResponse, CommitError> {
        if !self.wrote_header {
            self.writer
                .write_record(FieldKey::ALL.iter().map(|field| field.as_str()))?;
            self.wrote_header = true;
        }
        for record in request.records {
            self.writer
                .write_record(FieldKey::ALL.iter().map(|field| record.get(*field).trim()))?;
        }
        self.writer.flush()?;
        self.written += request.records.len();
        debug!(records = request.records.len(), "wrote batch");
        Ok(BulkCreateResponse {
            succeeded: request.records.len(),
            failed: 0,
            errors: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(row_index: usize, name: &str, class: &str) -> MappedRecord {
        MappedRecord::new(row_index)
            .with(FieldKey::Name, name)
            .with(FieldKey::Class, class)
    }

    #[test]
    fn duplicate_keys_fold_non_ascii_case() {
        let mut store = InMemoryStore::with_existing([student(0, "Zoë Ångström", "P5")]);
        let records = [student(1, " ZOË ÅNGSTRÖM", "p5"), student(2, "Zoe Angstrom", "P5")];
        let response = store
            .bulk_create(&BulkCreateRequest { records: &records })
            .unwrap();

        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 1);
        assert_eq!(response.errors[0].row_index, 1);
        assert_eq!(store.len(), 2);
    }
}
