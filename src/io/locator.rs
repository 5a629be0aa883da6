//! Resource file discovery.
//!
//! Walks a resource root and collects the string file of every locale
//! variant directory (`values`, `values-fr`, `values-night`, ...).

use crate::error::{DiscoveryError, IoError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Substring that marks a locale variant directory.
pub const VALUES_MARKER: &str = "values";

/// Default name of the resource file inside each variant directory.
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// Finds resource files under `root`.
///
/// `root` and every directory below it are visited. When a directory's name
/// contains [`VALUES_MARKER`] and it holds a regular file named `file_name`,
/// that file's path is recorded. Symbolic links to directories are not
/// followed. The result is sorted and may be empty.
///
/// # Errors
///
/// Returns an error if `root` does not exist, is not a directory, or a
/// directory below it cannot be listed.
pub fn locate(root: &Path, file_name: &str) -> Result<BTreeSet<PathBuf>> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound {
            path: root.display().to_string(),
        }
        .into());
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: root.display().to_string(),
        }
        .into());
    }

    let mut found = BTreeSet::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        if is_variant_dir(&dir) {
            let candidate = dir.join(file_name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "located resource file");
                found.insert(candidate);
            }
        }

        let listing = fs::read_dir(&dir).map_err(|e| dir_error(&dir, &e))?;
        for entry in listing {
            let entry = entry.map_err(|e| dir_error(&dir, &e))?;
            let file_type = entry.file_type().map_err(|e| dir_error(&dir, &e))?;
            if file_type.is_dir() {
                pending.push(entry.path());
            }
        }
    }

    Ok(found)
}

fn is_variant_dir(dir: &Path) -> bool {
    dir.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(VALUES_MARKER))
}

fn dir_error(dir: &Path, err: &std::io::Error) -> IoError {
    IoError::DirectoryFailed {
        path: dir.display().to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<resources/>").unwrap();
    }

    #[test]
    fn test_locate_skips_non_variant_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "values/strings.xml");
        touch(temp.path(), "values-fr/strings.xml");
        touch(temp.path(), "drawable/strings.xml");

        let found = locate(temp.path(), DEFAULT_FILE_NAME).unwrap();
        let expected: BTreeSet<PathBuf> = [
            temp.path().join("values/strings.xml"),
            temp.path().join("values-fr/strings.xml"),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_locate_variant_without_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("values-de")).unwrap();
        touch(temp.path(), "values-de/colors.xml");

        let found = locate(temp.path(), DEFAULT_FILE_NAME).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_locate_nested() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "main/res/values-b+sr+Latn/strings.xml");
        touch(temp.path(), "main/res/layout/strings.xml");

        let found = locate(temp.path(), DEFAULT_FILE_NAME).unwrap();
        assert_eq!(found.len(), 1);
        assert!(
            found
                .iter()
                .next()
                .unwrap()
                .ends_with("values-b+sr+Latn/strings.xml")
        );
    }

    #[test]
    fn test_locate_root_itself_is_variant() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "values/strings.xml");

        let found = locate(&temp.path().join("values"), DEFAULT_FILE_NAME).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_locate_custom_file_name() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "values/strings.xml");
        touch(temp.path(), "values/labels.xml");

        let found = locate(temp.path(), "labels.xml").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|p| p.ends_with("values/labels.xml")));
    }

    #[test]
    fn test_locate_directory_named_like_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("values/strings.xml")).unwrap();

        let found = locate(temp.path(), DEFAULT_FILE_NAME).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_locate_empty_root() {
        let temp = TempDir::new().unwrap();
        let found = locate(temp.path(), DEFAULT_FILE_NAME).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_locate_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = locate(&temp.path().join("nope"), DEFAULT_FILE_NAME);
        assert!(matches!(
            result,
            Err(Error::Discovery(DiscoveryError::RootNotFound { .. }))
        ));
    }

    #[test]
    fn test_locate_root_is_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "file.txt");
        let result = locate(&temp.path().join("file.txt"), DEFAULT_FILE_NAME);
        assert!(matches!(
            result,
            Err(Error::Discovery(DiscoveryError::NotADirectory { .. }))
        ));
    }
}
