//! # string-res
//!
//! Adds named string entries to every locale variant of an Android
//! string-resource tree.
//!
//! A run has three phases:
//!
//! - **Load**: every `values*/strings.xml` under the resource directory is
//!   located and parsed into a [`Document`]
//! - **Edit**: each key/value pair entered by the operator is sanitized and
//!   appended to every document that lacks the key
//! - **Save**: every document is re-rendered with 4-space indentation and
//!   written back in UTF-8

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{AddOutcome, Addition, Document, Entry, EntryKey, SessionReport, sanitize};

// Re-export storage types
pub use storage::{DocumentStore, ResourceFile};

// Re-export I/O entry points
pub use io::{locate, parse_document, render_document};

// Re-export CLI types
pub use cli::{Cli, OutputFormat};
