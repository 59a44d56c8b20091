//! Line → `Command` parsing.
//!
//! A command line is a case-insensitive command word followed by
//! whitespace-separated arguments:
//!
//! ```text
//! SET key value | GET key | DELETE key | COUNT value
//! BEGIN | COMMIT | ROLLBACK | END
//! ```

use crate::error::{CliError, CliResult};
use std::str::FromStr;

/// A parsed interpreter command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write a key in the active scope.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Print the current value of a key.
    Get {
        /// Key to resolve.
        key: String,
    },
    /// Delete a key.
    Delete {
        /// Key to delete.
        key: String,
    },
    /// Print how many keys currently hold a value.
    Count {
        /// Value to count.
        value: String,
    },
    /// Open a nested transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
    /// Terminate the session.
    End,
}

/// Returns true for lines the interpreter skips.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> CliResult<Self> {
        let mut parts = line.split_whitespace();
        let word = parts.next().ok_or(CliError::EmptyCommand)?;
        let args: Vec<&str> = parts.collect();

        match word.to_ascii_uppercase().as_str() {
            "SET" => {
                let [key, value] = arity::<2>("SET", &args)?;
                Ok(Self::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "GET" => {
                let [key] = arity::<1>("GET", &args)?;
                Ok(Self::Get {
                    key: key.to_string(),
                })
            }
            "DELETE" | "UNSET" => {
                let [key] = arity::<1>("DELETE", &args)?;
                Ok(Self::Delete {
                    key: key.to_string(),
                })
            }
            "COUNT" | "NUMEQUALTO" => {
                let [value] = arity::<1>("COUNT", &args)?;
                Ok(Self::Count {
                    value: value.to_string(),
                })
            }
            "BEGIN" => arity::<0>("BEGIN", &args).map(|_| Self::Begin),
            "COMMIT" => arity::<0>("COMMIT", &args).map(|_| Self::Commit),
            "ROLLBACK" => arity::<0>("ROLLBACK", &args).map(|_| Self::Rollback),
            "END" | "EXIT" | "QUIT" => Ok(Self::End),
            _ => Err(CliError::unknown_command(word)),
        }
    }
}

fn arity<'a, const N: usize>(command: &'static str, args: &[&'a str]) -> CliResult<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| CliError::WrongArity {
        command,
        expected: N,
        actual: args.len(),
    })
}
