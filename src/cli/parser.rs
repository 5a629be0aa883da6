//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::io::DEFAULT_FILE_NAME;
use clap::Parser;
use std::path::PathBuf;

/// Default resource root, relative to the project directory.
pub const DEFAULT_RES_DIR: &str = "composeApp/src/androidMain/res";

/// string-res: add a string entry to every locale of a resource tree.
///
/// Finds every `values*/strings.xml` under the resource directory, asks
/// for a name and a value, adds the entry wherever the name is missing,
/// and rewrites the files with 4-space indentation.
#[derive(Parser, Debug)]
#[command(name = "string-res")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Resource directory to search.
    #[arg(short, long, env = "STRING_RES_DIR", default_value = DEFAULT_RES_DIR)]
    pub res_dir: PathBuf,

    /// Resource file name inside each `values*` directory.
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Entry name; with --value, adds one entry without prompting.
    #[arg(short, long, requires = "value")]
    pub name: Option<String>,

    /// Entry value; with --name, adds one entry without prompting.
    #[arg(long, requires = "name")]
    pub value: Option<String>,

    /// Fail when no resource file is found.
    #[arg(long)]
    pub require_files: bool,

    /// Show what would be written without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose (debug) logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl Cli {
    /// Returns the `--name`/`--value` pair when both are given.
    #[must_use]
    pub fn one_shot(&self) -> Option<(&str, &str)> {
        self.name.as_deref().zip(self.value.as_deref())
    }
}
