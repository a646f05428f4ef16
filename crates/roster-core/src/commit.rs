//! Import committer.
//!
//! Sends validated records to a [`BulkCreate`] backend in sequential batches
//! and reports progress as a lazy sequence. Each call to `next` commits one
//! batch. The sequence is finite, starts at 0 (or a single 100 for an empty
//! commit), never decreases and ends at exactly 100.
//!
//! Failed records are skipped and the batch continues; the final
//! [`CommitTally`] lists them.

use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use roster_model::{CommitTally, ImportProgress, MappedRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CommitError;

/// Default number of records per backend call.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Failure message for records the backend counted as failed without naming.
pub const UNLISTED_FAILURE: &str = "rejected by backend";

/// Body of `POST /api/students/bulk`.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateRequest<'a> {
    pub records: &'a [MappedRecord],
}

/// A record the backend refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkError {
    pub row_index: usize,
    pub message: String,
}

/// Response of `POST /api/students/bulk`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default)]
    pub errors: Vec<BulkError>,
}

/// The bulk-create boundary.
pub trait BulkCreate {
    /// Create the records of one batch.
    ///
    /// Per-record rejections go in the response `errors`; an `Err` means the
    /// whole batch failed.
    fn bulk_create(
        &mut self,
        request: &BulkCreateRequest<'_>,
    ) -> Result<BulkCreateResponse, CommitError>;
}

/// Cooperative cancellation for a commit.
///
/// [`CancelToken::never`] is the placeholder the wizard passes today; a token
/// from [`CancelToken::new`] can be cancelled from elsewhere and the commit
/// stops before its next batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Option<Arc<AtomicBool>>,
}

impl CancelToken {
    /// A token that can never be cancelled.
    pub fn never() -> Self {
        Self { flag: None }
    }

    pub fn new() -> Self {
        Self {
            flag: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Request cancellation. No-op for [`CancelToken::never`].
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Release);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    pub fn can_cancel(&self) -> bool {
        self.flag.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOptions {
    pub batch_size: usize,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CommitOptions {
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    NotStarted,
    Running,
    Done,
}

/// Lazy progress sequence of one commit. Consumed once; never restarts.
pub struct CommitStream<'a> {
    backend: &'a mut dyn BulkCreate,
    records: Vec<MappedRecord>,
    batch_size: usize,
    cancel: CancelToken,
    cursor: usize,
    state: StreamState,
    tally: CommitTally,
}

/// Start committing `records`. Nothing is sent until the stream is polled.
///
/// Backend errors are matched to the batch by `row_index`, each error
/// claiming the first record of that row not already failed, so duplicate
/// row indices are counted separately. Errors naming rows outside the batch
/// are ignored. When the backend reports more failures than it lists, the
/// remaining records of the batch are failed in order with
/// "rejected by backend" until the counts agree.
pub fn commit<'a>(
    records: Vec<MappedRecord>,
    backend: &'a mut dyn BulkCreate,
    options: CommitOptions,
    cancel: CancelToken,
) -> CommitStream<'a> {
    CommitStream {
        backend,
        records,
        batch_size: options.batch_size.max(1),
        cancel,
        cursor: 0,
        state: StreamState::NotStarted,
        tally: CommitTally::default(),
    }
}

impl CommitStream<'_> {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Done
    }

    /// Tally so far; final once [`Self::is_finished`] is true.
    pub fn tally(&self) -> &CommitTally {
        &self.tally
    }

    /// Run the remaining batches and return the final tally.
    pub fn finish(mut self) -> CommitTally {
        for _ in self.by_ref() {}
        self.tally
    }

    fn commit_next_batch(&mut self) {
        let start = self.cursor;
        let end = (start + self.batch_size).min(self.records.len());
        let batch = &self.records[start..end];

        if self.cancel.is_cancelled() {
            warn!(remaining = self.records.len() - start, "commit cancelled");
            for record in &self.records[start..] {
                self.tally.record_failure(record.row_index, "cancelled");
            }
            self.cursor = self.records.len();
            return;
        }

        match self.backend.bulk_create(&BulkCreateRequest { records: batch }) {
            Ok(response) => {
                let reported = response.failed.min(batch.len());
                let mut outcomes: Vec<Option<String>> = vec![None; batch.len()];
                let mut listed = 0;
                for error in response.errors {
                    let slot = batch.iter().zip(&outcomes).position(|(record, outcome)| {
                        outcome.is_none() && record.row_index == error.row_index
                    });
                    if let Some(slot) = slot {
                        outcomes[slot] = Some(error.message);
                        listed += 1;
                    }
                }
                if response.failed != listed {
                    warn!(
                        reported = response.failed,
                        listed,
                        "backend failure count does not match its error list"
                    );
                }
                let mut unlisted = reported.saturating_sub(listed);
                for outcome in outcomes.iter_mut().filter(|outcome| outcome.is_none()) {
                    if unlisted == 0 {
                        break;
                    }
                    *outcome = Some(UNLISTED_FAILURE.to_string());
                    unlisted -= 1;
                }

                let mut failed = 0;
                for (record, outcome) in batch.iter().zip(outcomes) {
                    match outcome {
                        Some(message) => {
                            self.tally.record_failure(record.row_index, message);
                            failed += 1;
                        }
                        None => self.tally.succeeded += 1,
                    }
                }
                debug!(start, size = batch.len(), failed, "batch committed");
            }
            Err(error) => {
                warn!(start, size = batch.len(), "batch failed: {error}");
                let message = error.to_string();
                for record in batch {
                    self.tally.record_failure(record.row_index, message.clone());
                }
            }
        }
        self.cursor = end;
    }
}

impl Iterator for CommitStream<'_> {
    type Item = ImportProgress;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.records.len();
        match self.state {
            StreamState::Done => None,
            StreamState::NotStarted => {
                info!(total, batch_size = self.batch_size, "commit started");
                if total == 0 {
                    self.state = StreamState::Done;
                    return Some(ImportProgress::new(0, 0));
                }
                self.state = StreamState::Running;
                Some(ImportProgress::start(total))
            }
            StreamState::Running => {
                self.commit_next_batch();
                if self.cursor >= total {
                    self.state = StreamState::Done;
                    info!(
                        succeeded = self.tally.succeeded,
                        failed = self.tally.failed,
                        "commit finished"
                    );
                }
                Some(ImportProgress::new(self.cursor, total))
            }
        }
    }
}

impl FusedIterator for CommitStream<'_> {}
