//! Session storage for string-res.
//!
//! Holds the parsed resource documents of one run and writes them back when
//! the run ends. Nothing is persisted between runs other than the resource
//! files themselves.

pub mod store;

pub use store::{DocumentStore, FileOutcome, ResourceFile};
