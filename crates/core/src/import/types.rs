//! Import result and per-call accumulator.

use serde::{Deserialize, Serialize};

use super::row::RowOutcome;
use crate::entry::Entry;

/// Outcome of one CSV upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Rows persisted as entries, soft-failed rows included.
    pub entries_imported: usize,
    /// Rows rejected by a hard failure.
    pub errors: usize,
    /// Diagnostics in row order.
    pub error_messages: Vec<String>,
    /// Each persisted entry as a JSON document.
    pub imported_entries_json: Vec<String>,
}

/// Accumulator owned by a single import call.
#[derive(Debug, Default)]
pub(crate) struct ImportTally {
    pub(crate) entries: Vec<Entry>,
    pub(crate) errors: usize,
    pub(crate) messages: Vec<String>,
}

impl ImportTally {
    pub(crate) fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::HardFailure { message } => self.reject(message),
            RowOutcome::SoftFailure { entry, message } => {
                self.messages.push(message);
                self.entries.push(entry);
            }
            RowOutcome::Clean { entry } => self.entries.push(entry),
        }
    }

    pub(crate) fn reject(&mut self, message: String) {
        self.errors += 1;
        self.messages.push(message);
    }
}
