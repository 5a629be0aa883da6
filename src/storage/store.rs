//! In-memory document store.
//!
//! The store owns one parsed [`Document`] per located resource file for
//! the duration of a run. It is built once (load phase), mutated by the
//! session, and flushed back to disk at the end (save phase).

use crate::core::{AddOutcome, Document, EntryKey};
use crate::error::Result;
use crate::io::{locate, parse_document, read_file, render_document, write_file};
use std::path::{Path, PathBuf};

/// A resource file and its parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    path: PathBuf,
    document: Document,
}

impl ResourceFile {
    /// Pairs a path with an already-parsed document.
    #[must_use]
    pub const fn new(path: PathBuf, document: Document) -> Self {
        Self { path, document }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed.
    pub fn load(path: PathBuf) -> Result<Self> {
        let text = read_file(&path)?;
        let document = parse_document(&text, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            entries = document.len(),
            "loaded resource file"
        );
        Ok(Self { path, document })
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the parsed document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Renders the document as it would be written.
    #[must_use]
    pub fn render(&self) -> String {
        render_document(&self.document)
    }

    /// Overwrites the file with the rendered document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        write_file(&self.path, &self.render())
    }
}

/// Outcome of adding one entry to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// File the entry was applied to.
    pub path: PathBuf,
    /// What happened.
    pub outcome: AddOutcome,
}

/// All resource documents of one run, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    files: Vec<ResourceFile>,
}

impl DocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Locates every resource file under `root` and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails or any file cannot be read or
    /// parsed. A single bad file aborts the whole load.
    pub fn open(root: &Path, file_name: &str) -> Result<Self> {
        let paths = locate(root, file_name)?;
        if paths.is_empty() {
            tracing::warn!(root = %root.display(), file_name, "no resource files found");
        }
        Self::load(paths)
    }

    /// Loads the given files.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or parsed.
    pub fn load<I>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut store = Self::new();
        for path in paths {
            store.insert(ResourceFile::load(path)?);
        }
        Ok(store)
    }

    /// Adds a file, replacing any file with the same path.
    pub fn insert(&mut self, file: ResourceFile) {
        match self.files.binary_search_by(|f| f.path.cmp(&file.path)) {
            Ok(i) => self.files[i] = file,
            Err(i) => self.files.insert(i, file),
        }
    }

    /// Returns the file stored under `path`.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&ResourceFile> {
        self.files
            .binary_search_by(|f| f.path.as_path().cmp(path))
            .ok()
            .map(|i| &self.files[i])
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over the files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceFile> {
        self.files.iter()
    }

    /// Adds `key`/`value` to every document that lacks `key`.
    pub fn add_entry(&mut self, key: &EntryKey, value: &str) -> Vec<FileOutcome> {
        self.files
            .iter_mut()
            .map(|file| {
                let outcome = file.document.add_entry(key, value);
                match outcome {
                    AddOutcome::Added => {
                        tracing::debug!(path = %file.path.display(), %key, "entry added");
                    }
                    AddOutcome::Duplicate => {
                        tracing::info!(path = %file.path.display(), %key, "entry already exists");
                    }
                }
                FileOutcome {
                    path: file.path.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// Writes every document back to its file, modified or not.
    ///
    /// `on_saved` is called with each path as soon as its file is written,
    /// so confirmations are reported even if a later write fails. With
    /// `dry_run` nothing is written and `on_saved` still sees every path.
    /// Returns the paths in the order they were (or would have been)
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error on the first file that cannot be written, or if
    /// `on_saved` fails; files written before it stay written.
    pub fn save<F>(&self, dry_run: bool, mut on_saved: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            if dry_run {
                tracing::debug!(path = %file.path.display(), "dry run, not writing");
            } else {
                file.save()?;
                tracing::info!(path = %file.path.display(), "saved resource file");
            }
            on_saved(&file.path)?;
            written.push(file.path.clone());
        }
        Ok(written)
    }
}
