//! Interpreter session.
//!
//! A session owns one store and feeds it commands read line by line from
//! any `BufRead`, writing results to any `Write`. End of input ends the
//! session the same way `END` does.

use crate::error::{CliError, CliResult};
use crate::parse::{is_blank_or_comment, Command};
use clap::ValueEnum;
use nestkv_core::LayeredStore;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Printed for a lookup that finds nothing.
pub const NULL_REPLY: &str = "NULL";

/// Printed when commit or rollback is issued at the root.
pub const NO_TRANSACTION_REPLY: &str = "NO TRANSACTION";

/// Output format for end-of-session statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Presentation settings for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Prompt written before each read.
    pub prompt: Option<String>,
    /// Whether each command line is echoed before its result.
    pub echo: bool,
    /// Statistics printed when the session ends.
    pub stats: Option<StatsFormat>,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// An `END` command was read.
    EndCommand,
    /// The input was exhausted.
    EndOfInput,
}

/// A command interpreter bound to one store.
#[derive(Debug)]
pub struct Session {
    store: LayeredStore,
    config: SessionConfig,
}

impl Session {
    /// Creates a session over `store`.
    pub fn new(store: LayeredStore, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Returns the session's store.
    pub fn store(&self) -> &LayeredStore {
        &self.store
    }

    /// Reads and executes commands until `END` or end of input.
    ///
    /// Malformed lines produce an `ERR` reply and the session continues.
    /// I/O failures abort the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> CliResult<SessionEnd> {
        let mut line = String::new();
        let end = loop {
            if let Some(prompt) = &self.config.prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break SessionEnd::EndOfInput;
            }

            let text = line.trim();
            if is_blank_or_comment(text) {
                continue;
            }
            if self.config.echo {
                writeln!(out, "{text}")?;
            }

            match text.parse::<Command>() {
                Ok(Command::End) => break SessionEnd::EndCommand,
                Ok(command) => {
                    if let Some(reply) = self.execute(command) {
                        writeln!(out, "{reply}")?;
                    }
                }
                Err(err) if err.is_input_error() => {
                    warn!(line = text, error = %err, "rejected command");
                    writeln!(out, "ERR {err}")?;
                }
                Err(err) => return Err(err),
            }
        };

        if let Some(format) = self.config.stats {
            self.write_stats(format, out)?;
        }
        out.flush()?;
        Ok(end)
    }

    /// Executes one command and returns the line to print, if any.
    pub fn execute(&mut self, command: Command) -> Option<String> {
        match command {
            Command::Set { key, value } => {
                self.store.set(key, value);
                None
            }
            Command::Get { key } => Some(
                self.store
                    .get(&key)
                    .unwrap_or(NULL_REPLY)
                    .to_string(),
            ),
            Command::Delete { key } => {
                self.store.delete(&key);
                None
            }
            Command::Count { value } => Some(self.store.count(&value).to_string()),
            Command::Begin => {
                self.store.begin();
                None
            }
            Command::Commit => self.finish(LayeredStore::commit),
            Command::Rollback => self.finish(LayeredStore::rollback),
            Command::End => None,
        }
    }

    fn finish(
        &mut self,
        op: fn(&mut LayeredStore) -> nestkv_core::CoreResult<()>,
    ) -> Option<String> {
        match op(&mut self.store) {
            Ok(()) => None,
            Err(err) if err.is_no_open_transaction() => Some(NO_TRANSACTION_REPLY.to_string()),
            Err(err) => Some(format!("ERR {}", CliError::from(err))),
        }
    }

    /// Writes the store's statistics in `format`.
    pub fn write_stats<W: Write>(&self, format: StatsFormat, out: &mut W) -> CliResult<()> {
        let snap = self.store.stats().snapshot();
        match format {
            StatsFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&snap)?)?;
            }
            StatsFormat::Text => {
                writeln!(out, "Session Statistics")?;
                writeln!(out, "==================")?;
                writeln!(out, "Reads:       {} ({} misses)", snap.reads, snap.read_misses)?;
                writeln!(out, "Writes:      {}", snap.writes)?;
                writeln!(out, "Deletes:     {}", snap.deletes)?;
                writeln!(out, "Counts:      {}", snap.counts)?;
                writeln!(
                    out,
                    "Begun:       {} ({} committed, {} rolled back)",
                    snap.transactions_begun,
                    snap.transactions_committed,
                    snap.transactions_rolled_back
                )?;
                writeln!(out, "Rejected:    {}", snap.rejected)?;
                writeln!(out, "Open:        {}", self.store.depth().open_transactions())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, SessionEnd) {
        run_with(script, SessionConfig::default())
    }

    fn run_with(script: &str, config: SessionConfig) -> (String, SessionEnd) {
        let mut session = Session::new(LayeredStore::new(), config);
        let mut out = Vec::new();
        let end = session.run(Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), end)
    }

    #[test]
    fn basic_commands() {
        let (out, end) = run_script("SET a 10\nGET a\nDELETE a\nGET a\nEND\n");
        assert_eq!(out, "10\nNULL\n");
        assert_eq!(end, SessionEnd::EndCommand);
    }

    #[test]
    fn end_of_input_terminates() {
        let (out, end) = run_script("SET a 1\nGET a");
        assert_eq!(out, "1\n");
        assert_eq!(end, SessionEnd::EndOfInput);
    }

    #[test]
    fn empty_input_terminates() {
        let (out, end) = run_script("");
        assert!(out.is_empty());
        assert_eq!(end, SessionEnd::EndOfInput);
    }

    #[test]
    fn lines_after_end_are_ignored() {
        let (out, _) = run_script("END\nGET a\n");
        assert!(out.is_empty());
    }

    #[test]
    fn no_transaction_reply() {
        let (out, _) = run_script("COMMIT\nROLLBACK\n");
        assert_eq!(out, "NO TRANSACTION\nNO TRANSACTION\n");
    }

    #[test]
    fn nested_transactions() {
        let script = "\
SET a 10
BEGIN
SET a 20
GET a
BEGIN
SET a 30
GET a
ROLLBACK
GET a
ROLLBACK
GET a
END
";
        let (out, _) = run_script(script);
        assert_eq!(out, "20\n30\n20\n10\n");
    }

    #[test]
    fn commit_closes_one_level() {
        let script = "\
BEGIN
SET a 30
BEGIN
SET a 40
COMMIT
GET a
ROLLBACK
GET a
COMMIT
";
        let (out, _) = run_script(script);
        assert_eq!(out, "40\nNULL\nNO TRANSACTION\n");
    }

    #[test]
    fn count_command() {
        let script = "\
SET a 10
SET b 10
COUNT 10
COUNT 20
BEGIN
DELETE a
COUNT 10
ROLLBACK
COUNT 10
";
        let (out, _) = run_script(script);
        assert_eq!(out, "2\n0\n1\n2\n");
    }

    #[test]
    fn bad_lines_report_and_continue() {
        let (out, end) = run_script("FROB\nSET a\n# comment\n\nSET a 1\nGET a\n");
        assert_eq!(
            out,
            "ERR unknown command: FROB\nERR SET expects 2 argument(s), got 1\n1\n"
        );
        assert_eq!(end, SessionEnd::EndOfInput);
    }

    #[test]
    fn echo_and_prompt() {
        let config = SessionConfig {
            prompt: Some("> ".into()),
            echo: true,
            stats: None,
        };
        let (out, _) = run_with("GET a\n", config);
        assert_eq!(out, "> GET a\nNULL\n> ");
    }

    #[test]
    fn json_stats_at_end() {
        let config = SessionConfig {
            stats: Some(StatsFormat::Json),
            ..SessionConfig::default()
        };
        let (out, _) = run_with("SET a 1\nGET a\nCOMMIT\n", config);
        let (replies, stats) = out.split_at(out.find('{').unwrap());
        assert_eq!(replies, "1\nNO TRANSACTION\n");
        let json: serde_json::Value = serde_json::from_str(stats).unwrap();
        assert_eq!(json["writes"], 1);
        assert_eq!(json["reads"], 1);
        assert_eq!(json["rejected"], 1);
    }

    #[test]
    fn text_stats_at_end() {
        let config = SessionConfig {
            stats: Some(StatsFormat::Text),
            ..SessionConfig::default()
        };
        let (out, _) = run_with("BEGIN\nSET a 1\n", config);
        assert!(out.starts_with("Session Statistics"));
        assert!(out.contains("Writes:      1"));
        assert!(out.contains("Open:        1"));
    }

    #[test]
    fn script_vectors() {
        for vector in nestkv_testkit::script_vectors() {
            let (out, end) = run_script(&vector.script);
            assert_eq!(out, vector.expected, "vector {}", vector.id);
            assert_eq!(end, SessionEnd::EndCommand, "vector {}", vector.id);
        }
    }

    #[test]
    fn execute_returns_reply() {
        let mut session = Session::new(LayeredStore::new(), SessionConfig::default());
        assert_eq!(
            session.execute(Command::Set {
                key: "a".into(),
                value: "1".into()
            }),
            None
        );
        assert_eq!(
            session.execute(Command::Get { key: "a".into() }),
            Some("1".to_string())
        );
        assert_eq!(session.store().get("a"), Some("1"));
    }
}
