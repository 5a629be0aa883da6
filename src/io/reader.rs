//! Resource file reading and writing.
//!
//! Thin wrappers over `std::fs` that enforce UTF-8 and attach the file path
//! to every failure.

use crate::error::{IoError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Largest resource file accepted (16MB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// An opened resource file.
///
/// # Examples
///
/// ```no_run
/// use string_res::io::FileReader;
///
/// let reader = FileReader::open("res/values/strings.xml").unwrap();
/// let content = reader.read_to_string().unwrap();
/// ```
pub struct FileReader {
    file: File,
    size: u64,
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than the accepted maximum.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.display().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the whole file as UTF-8.
    ///
    /// A leading byte-order mark is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or content is not valid UTF-8.
    #[allow(clippy::cast_possible_truncation)]
    pub fn read_to_string(&self) -> Result<String> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut content = String::from_utf8(buffer).map_err(|e| IoError::ReadFailed {
            path: self.path.clone(),
            reason: format!("invalid UTF-8: {e}"),
        })?;

        if content.starts_with('\u{feff}') {
            content.drain(..'\u{feff}'.len_utf8());
        }
        Ok(content)
    }
}

/// Reads a file to a string.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Overwrites a file with `content`, encoded as UTF-8.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path_ref = path.as_ref();

    std::fs::write(path_ref, content).map_err(|e| IoError::WriteFailed {
        path: path_ref.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}
