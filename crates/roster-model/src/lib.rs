pub mod error;
pub mod field;
pub mod issue;
pub mod mapping;
pub mod progress;
pub mod record;
pub mod table;
pub mod text;

pub use error::{ModelError, Result};
pub use field::{FieldKey, FieldRule, ImportField};
pub use issue::{IssueKind, ValidationIssue};
pub use mapping::ColumnMapping;
pub use progress::{CommitTally, ImportProgress, RecordFailure};
pub use record::MappedRecord;
pub use table::{RawRow, SourceTable};
pub use text::{fold_case, same_folded};
