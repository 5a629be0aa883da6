//! Interactive session driver.
//!
//! The driver is a two-state machine. In [`State::Prompting`] it reads a
//! key and a value, applies them to every document in the store, and asks
//! whether to continue; any answer other than `y`/`yes` moves it to
//! [`State::Done`]. Line input comes from a [`LineSource`] so sessions can
//! be scripted.
//!
//! Input that ends while a name or value is expected is an error, so the
//! run stops before anything is saved. Input that ends at the continue
//! prompt counts as "no".

use crate::core::{AddOutcome, Addition, EntryKey};
use crate::error::{CommandError, Result};
use crate::storage::DocumentStore;
use std::io::{self, BufRead, Write};

/// Prompt for the entry key.
pub const NAME_PROMPT: &str = "Enter the name (ID) of the string: ";

/// Prompt for the entry value.
pub const VALUE_PROMPT: &str = "Enter the value of the string: ";

/// Prompt asking whether to add another entry.
pub const CONTINUE_PROMPT: &str = "Do you want to add another string? (y/N): ";

/// A source of operator input.
pub trait LineSource {
    /// Shows `prompt` and reads one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown or input cannot be
    /// read.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Line source backed by a reader and a prompt writer.
///
/// # Examples
///
/// ```
/// use string_res::cli::driver::{ConsoleSource, LineSource};
///
/// let mut source = ConsoleSource::new("first\nsecond\n".as_bytes(), Vec::new());
/// assert_eq!(source.read_line("> ").unwrap().as_deref(), Some("first"));
/// assert_eq!(source.read_line("> ").unwrap().as_deref(), Some("second"));
/// assert_eq!(source.read_line("> ").unwrap(), None);
/// ```
pub struct ConsoleSource<R, W> {
    input: R,
    prompts: W,
}

impl<R: BufRead, W: Write> ConsoleSource<R, W> {
    /// Creates a source reading from `input` and prompting on `prompts`.
    pub const fn new(input: R, prompts: W) -> Self {
        Self { input, prompts }
    }

    /// Returns the prompt writer.
    pub const fn prompts(&self) -> &W {
        &self.prompts
    }
}

impl<R: BufRead, W: Write> LineSource for ConsoleSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.write_all(prompt.as_bytes())?;
        self.prompts.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Driver states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Asking for the next key/value pair.
    Prompting,
    /// Finished; the store is ready to be saved.
    Done,
}

/// Returns true if `answer` asks to continue (`y` or `yes`, any case,
/// surrounding whitespace ignored).
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Sanitizes `raw_key` and adds the pair to every document in `store`.
///
/// A notice line is written to `notices` for each file that already has
/// the key.
///
/// # Errors
///
/// Returns an error if a notice cannot be written.
pub fn apply<W: Write>(
    store: &mut DocumentStore,
    raw_key: &str,
    value: &str,
    notices: &mut W,
) -> Result<Addition> {
    let key = EntryKey::sanitized(raw_key);
    if key.as_str() != raw_key {
        tracing::debug!(raw = raw_key, %key, "sanitized key");
    }

    let mut added_to = Vec::new();
    let mut skipped_in = Vec::new();
    for file in store.add_entry(&key, value) {
        match file.outcome {
            AddOutcome::Added => added_to.push(file.path),
            AddOutcome::Duplicate => {
                writeln!(
                    notices,
                    "String '{key}' already exists in {}",
                    file.path.display()
                )?;
                skipped_in.push(file.path);
            }
        }
    }

    Ok(Addition {
        key,
        value: value.to_string(),
        added_to,
        skipped_in,
    })
}

/// Runs the prompt loop over a [`DocumentStore`].
pub struct Driver<S, W> {
    source: S,
    notices: W,
    state: State,
}

impl<S: LineSource, W: Write> Driver<S, W> {
    /// Creates a driver in the [`State::Prompting`] state.
    pub const fn new(source: S, notices: W) -> Self {
        Self {
            source,
            notices,
            state: State::Prompting,
        }
    }

    /// Returns the current state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Consumes the driver, returning its line source and notice writer.
    pub fn into_parts(self) -> (S, W) {
        (self.source, self.notices)
    }

    /// Prompts until the operator stops, returning every pair applied.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or output written, or if
    /// input ends at the name or value prompt.
    pub fn run(&mut self, store: &mut DocumentStore) -> Result<Vec<Addition>> {
        let mut additions = Vec::new();
        while self.state == State::Prompting {
            self.state = self.step(store, &mut additions)?;
        }
        Ok(additions)
    }

    fn step(&mut self, store: &mut DocumentStore, additions: &mut Vec<Addition>) -> Result<State> {
        let name = self
            .source
            .read_line(NAME_PROMPT)?
            .ok_or_else(|| CommandError::InputEnded("name".to_string()))?;
        let value = self
            .source
            .read_line(VALUE_PROMPT)?
            .ok_or_else(|| CommandError::InputEnded("value".to_string()))?;

        additions.push(apply(store, &name, &value, &mut self.notices)?);

        let answer = self.source.read_line(CONTINUE_PROMPT)?;
        if answer.as_deref().is_some_and(is_affirmative) {
            Ok(State::Prompting)
        } else {
            Ok(State::Done)
        }
    }
}

/// Console source over the process's stdin, prompting on `prompts`.
pub fn stdin_source<W: Write>(prompts: W) -> ConsoleSource<io::StdinLock<'static>, W> {
    ConsoleSource::new(io::stdin().lock(), prompts)
}
