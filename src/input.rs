//! Terminal input for the interactive prompts.
//!
//! All prompting goes through the [`LineSource`] trait so the collectors can
//! be driven by a scripted source in tests instead of a live terminal. The
//! real implementation wraps rustyline; Ctrl-C and Ctrl-D surface as
//! [`InputError::Cancelled`] rather than killing the process, and the caller
//! decides what cancellation means.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Prompt string shown when waiting for a line of input.
pub const PROMPT: &str = "> ";

/// Errors surfaced by a [`LineSource`].
#[derive(Debug, Error)]
pub enum InputError {
    /// The user cancelled the prompt (Ctrl-C, Ctrl-D, or end of input).
    #[error("input cancelled")]
    Cancelled,

    /// The terminal could not be read.
    #[error("failed to read input")]
    Read(#[source] ReadlineError),
}

/// A source of user-typed lines.
pub trait LineSource {
    /// Read one line, blocking until the user responds.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Cancelled`] when the user cancels the prompt and
    /// [`InputError::Read`] when the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Interactive line source backed by rustyline.
pub struct ReadlineSource {
    editor: DefaultEditor,
}

impl ReadlineSource {
    /// Create an editor attached to the current terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialised.
    pub fn new() -> anyhow::Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Self { editor })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Err(InputError::Cancelled),
            Err(err) => Err(InputError::Read(err)),
        }
    }
}

/// Scripted line source for tests: yields the queued lines in order, then
/// reports cancellation.
pub struct ScriptedLines {
    lines: std::collections::VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, _prompt: &str) -> Result<String, InputError> {
        self.lines.pop_front().ok_or(InputError::Cancelled)
    }
}

/// Tidy raw user input: strip leading/trailing whitespace, lowercase, and
/// collapse internal whitespace runs to single spaces (useful for
/// "new  york   city").
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
