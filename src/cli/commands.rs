//! CLI command implementation.
//!
//! Load phase, edit phase (interactive or one-shot), save phase.

use crate::cli::driver::{Driver, LineSource, apply, stdin_source};
use crate::cli::output::{OutputFormat, format_report, save_notice};
use crate::cli::parser::Cli;
use crate::core::SessionReport;
use crate::error::{DiscoveryError, Result};
use crate::storage::DocumentStore;
use std::io::{self, Write};

/// Executes the CLI command against the real console.
///
/// Prompts and notices go to stdout in text mode and to stderr in JSON mode
/// so that stdout carries only the JSON report.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if discovery, parsing, console I/O, or writing fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    let report = match format {
        OutputFormat::Text => run_session(cli, stdin_source(io::stdout()), io::stdout())?,
        OutputFormat::Json => run_session(cli, stdin_source(io::stderr()), io::stderr())?,
    };

    Ok(format_report(&report, format))
}

/// Runs one session with the given input source and notice writer.
///
/// The source is only consulted in interactive mode (no `--name`/`--value`).
/// Duplicate notices and one confirmation line per saved file are written
/// to `notices` as they happen.
///
/// # Errors
///
/// Returns an error if discovery, parsing, console I/O, or writing fails.
pub fn run_session<S, W>(cli: &Cli, source: S, mut notices: W) -> Result<SessionReport>
where
    S: LineSource,
    W: Write,
{
    let mut store = DocumentStore::open(&cli.res_dir, &cli.file_name)?;
    if store.is_empty() && cli.require_files {
        return Err(DiscoveryError::NoResourceFiles {
            path: cli.res_dir.display().to_string(),
            file_name: cli.file_name.clone(),
        }
        .into());
    }
    tracing::info!(files = store.len(), root = %cli.res_dir.display(), "loaded resource files");

    let additions = match cli.one_shot() {
        Some((name, value)) => vec![apply(&mut store, name, value, &mut notices)?],
        None => Driver::new(source, &mut notices).run(&mut store)?,
    };

    let saved = store.save(cli.dry_run, |path| {
        writeln!(notices, "{}", save_notice(path, cli.dry_run))?;
        Ok(())
    })?;

    Ok(SessionReport {
        additions,
        saved,
        dry_run: cli.dry_run,
    })
}
