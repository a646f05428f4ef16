//! Commit progress and outcome.

use serde::{Deserialize, Serialize};

/// Snapshot of an in-flight commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    /// Completion percentage, 0 to 100.
    pub percent: u8,
    pub processed: usize,
    pub total: usize,
}

impl ImportProgress {
    /// Progress after `processed` of `total` records; an empty commit is complete.
    pub fn new(processed: usize, total: usize) -> Self {
        let processed = processed.min(total);
        let percent = if total == 0 {
            100
        } else {
            (processed * 100 / total) as u8
        };
        Self {
            percent,
            processed,
            total,
        }
    }

    pub fn start(total: usize) -> Self {
        Self {
            percent: 0,
            processed: 0,
            total,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

/// A record that failed during commit despite passing validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailure {
    pub row_index: usize,
    pub message: String,
}

/// Final result of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTally {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
}

impl CommitTally {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn record_failure(&mut self, row_index: usize, message: impl Into<String>) {
        self.failed += 1;
        self.failures.push(RecordFailure {
            row_index,
            message: message.into(),
        });
    }
}
