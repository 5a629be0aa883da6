//! Core domain models for string-res.
//!
//! Resource documents, their entries, entry keys, and session reports.
//! These are pure domain models with no I/O dependencies.

pub mod document;
pub mod key;
pub mod report;

pub use document::{AddOutcome, Document, Element, Entry, Node};
pub use key::{EntryKey, KEY_PATTERN, is_valid_key, sanitize};
pub use report::{Addition, SessionReport};
