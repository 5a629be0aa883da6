//! Session outcome records.

use crate::core::key::EntryKey;
use serde::Serialize;
use std::path::PathBuf;

/// One key/value pair applied across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addition {
    /// Sanitized key.
    pub key: EntryKey,
    /// Raw value as entered.
    pub value: String,
    /// Files that received the entry.
    pub added_to: Vec<PathBuf>,
    /// Files that already had the key.
    pub skipped_in: Vec<PathBuf>,
}

/// Everything one run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Pairs applied, in the order they were entered.
    pub additions: Vec<Addition>,
    /// Files rewritten at the end of the run.
    pub saved: Vec<PathBuf>,
    /// True when nothing was actually written.
    pub dry_run: bool,
}

impl SessionReport {
    /// Total number of entries appended across all files.
    #[must_use]
    pub fn entries_added(&self) -> usize {
        self.additions.iter().map(|a| a.added_to.len()).sum()
    }

    /// Total number of duplicate keys skipped across all files.
    #[must_use]
    pub fn duplicates_skipped(&self) -> usize {
        self.additions.iter().map(|a| a.skipped_in.len()).sum()
    }
}
