//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::SessionReport;
use crate::error::Error;
use serde::Serialize;
use std::path::Path;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the outcome of a run.
#[must_use]
pub fn format_report(report: &SessionReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_report_text(report),
        OutputFormat::Json => format_json(report),
    }
}

/// Confirmation line for one saved file.
#[must_use]
pub fn save_notice(path: &Path, dry_run: bool) -> String {
    if dry_run {
        format!("Would save changes to {}", path.display())
    } else {
        format!("Saved changes to {}", path.display())
    }
}

// Per-file confirmations are written while saving; the text report only
// covers the case where nothing was saved.
fn format_report_text(report: &SessionReport) -> String {
    if report.saved.is_empty() {
        "No resource files found.\n".to_string()
    } else {
        String::new()
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Addition, EntryKey};
    use crate::error::CommandError;
    use std::path::PathBuf;

    fn sample_report(dry_run: bool) -> SessionReport {
        SessionReport {
            additions: vec![Addition {
                key: EntryKey::sanitized("new greeting"),
                value: "Hello!".to_string(),
                added_to: vec![PathBuf::from("res/values/strings.xml")],
                skipped_in: vec![PathBuf::from("res/values-fr/strings.xml")],
            }],
            saved: vec![
                PathBuf::from("res/values/strings.xml"),
                PathBuf::from("res/values-fr/strings.xml"),
            ],
            dry_run,
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_save_notice() {
        let path = Path::new("res/values/strings.xml");
        assert_eq!(
            save_notice(path, false),
            "Saved changes to res/values/strings.xml"
        );
        assert_eq!(
            save_notice(path, true),
            "Would save changes to res/values/strings.xml"
        );
    }

    #[test]
    fn test_format_report_text_leaves_confirmations_to_save() {
        assert!(format_report(&sample_report(false), OutputFormat::Text).is_empty());
        assert!(format_report(&sample_report(true), OutputFormat::Text).is_empty());
    }

    #[test]
    fn test_format_report_empty() {
        let output = format_report(&SessionReport::default(), OutputFormat::Text);
        assert_eq!(output, "No resource files found.\n");
    }

    #[test]
    fn test_format_report_json() {
        let output = format_report(&sample_report(false), OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["additions"][0]["key"], "new_greeting");
        assert_eq!(json["additions"][0]["value"], "Hello!");
        assert_eq!(
            json["additions"][0]["skipped_in"][0],
            "res/values-fr/strings.xml"
        );
        assert_eq!(json["saved"].as_array().unwrap().len(), 2);
        assert_eq!(json["dry_run"], false);
    }

    #[test]
    fn test_format_error() {
        let err: Error = CommandError::InputEnded("value".to_string()).into();
        assert_eq!(
            format_error(&err, OutputFormat::Text),
            "command error: input ended while waiting for the value"
        );

        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("input ended"));
    }
}
