//! Error types for string-res operations.
//!
//! This module provides the error hierarchy using `thiserror` for resource
//! discovery, XML parsing, key validation, file I/O, and CLI commands.

use thiserror::Error;

/// Result type alias for string-res operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource discovery errors.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Malformed resource documents.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid entry keys.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised while locating resource files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The resource root does not exist.
    #[error("resource directory not found: {path}")]
    RootNotFound {
        /// Path that was searched.
        path: String,
    },

    /// The resource root exists but is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// Offending path.
        path: String,
    },

    /// No resource file was found and files were required.
    #[error("no {file_name} found under {path}")]
    NoResourceFiles {
        /// Root directory that was searched.
        path: String,
        /// Resource file name looked for.
        file_name: String,
    },
}

/// Errors raised while parsing a resource document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Syntax error reported by the XML reader.
    #[error("{path}: malformed XML: {reason}")]
    Malformed {
        /// File being parsed.
        path: String,
        /// Reader diagnostic.
        reason: String,
    },

    /// The document has no root element.
    #[error("{path}: no root element")]
    MissingRoot {
        /// File being parsed.
        path: String,
    },

    /// A second top-level element follows the root.
    #[error("{path}: unexpected second root element <{name}>")]
    MultipleRoots {
        /// File being parsed.
        path: String,
        /// Name of the extra element.
        name: String,
    },

    /// An element is still open at end of input.
    #[error("{path}: unclosed element <{name}>")]
    Unclosed {
        /// File being parsed.
        path: String,
        /// Name of the open element.
        name: String,
    },

    /// Character data appears outside the root element.
    #[error("{path}: text outside root element")]
    StrayText {
        /// File being parsed.
        path: String,
    },
}

/// Errors raised while validating entry keys.
#[derive(Error, Debug)]
pub enum KeyError {
    /// Key does not match `[A-Za-z_][A-Za-z0-9_.-]*`.
    #[error("invalid key: {key:?}")]
    Invalid {
        /// The rejected key.
        key: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to list a directory.
    #[error("failed to read directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Input ended while a name or value was being asked for.
    #[error("input ended while waiting for the {0}")]
    InputEnded(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}
