//! CLI layer for string-res.
//!
//! Provides the command-line interface using clap, the interactive prompt
//! loop, and report formatting.

pub mod commands;
pub mod driver;
pub mod output;
pub mod parser;

pub use commands::{execute, run_session};
pub use driver::{ConsoleSource, Driver, LineSource, State};
pub use output::OutputFormat;
pub use parser::Cli;
