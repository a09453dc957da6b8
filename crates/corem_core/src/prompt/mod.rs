//! Line-oriented input collection.
//!
//! # Responsibility
//! - Abstract the interactive prompt so core flows can run against a
//!   terminal or against scripted answers.
//! - Turn prompt answers into service request structs (`forms`).
//!
//! # Invariants
//! - A required prompt answered with blank text fails with `MissingInput`;
//!   the core never terminates the process itself.
//! - Secure answers keep inner and surrounding spaces; only line endings
//!   are stripped.

pub mod forms;
mod scripted;

pub use scripted::ScriptedPrompter;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PromptResult<T> = Result<T, PromptError>;

#[derive(Debug)]
pub enum PromptError {
    /// A required prompt received blank input.
    MissingInput(String),
    /// Input stream ended before an answer was read.
    Closed,
    /// The user cancelled at the prompt (Ctrl-C).
    Interrupted,
    Io(std::io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(label) => write!(f, "input required: {label}"),
            Self::Closed => write!(f, "input stream closed"),
            Self::Interrupted => write!(f, "interrupted"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Source of single-line answers.
///
/// Implementors provide raw line reading; trimming and required/optional
/// handling live in the provided methods.
pub trait Prompter {
    /// Shows `label` and reads one raw line. `secure` asks for no echo.
    fn read_line(&mut self, label: &str, secure: bool) -> PromptResult<String>;

    /// Reads a required, trimmed answer.
    fn required(&mut self, label: &str) -> PromptResult<String> {
        let answer = self.read_line(label, false)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return Err(PromptError::MissingInput(label.trim().to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Reads an optional, trimmed answer; blank becomes `None`.
    fn optional(&mut self, label: &str) -> PromptResult<Option<String>> {
        let answer = self.read_line(label, false)?;
        let trimmed = answer.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    /// Reads a required answer without echo.
    fn secret(&mut self, label: &str) -> PromptResult<String> {
        let answer = self.read_line(label, true)?;
        let stripped = answer.trim_end_matches(['\r', '\n']);
        if stripped.is_empty() {
            return Err(PromptError::MissingInput(label.trim().to_string()));
        }
        Ok(stripped.to_string())
    }
}
