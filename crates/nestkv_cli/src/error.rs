//! Error types for the command interpreter.

use nestkv_core::CoreError;
use std::io;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading or executing commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Store error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error on the input or output stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The line held no command word.
    #[error("empty command")]
    EmptyCommand,

    /// The command word is not recognised.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// The command word as typed.
        command: String,
    },

    /// The command was given the wrong number of arguments.
    #[error("{command} expects {expected} argument(s), got {actual}")]
    WrongArity {
        /// Canonical command name.
        command: &'static str,
        /// Number of arguments required.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
}

impl CliError {
    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Returns true if the error is caused by the input line rather than
    /// the environment. Such errors are reported and the session goes on.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand | Self::UnknownCommand { .. } | Self::WrongArity { .. }
        )
    }
}
