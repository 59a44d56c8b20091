//! Repl command implementation.

use crate::error::CliResult;
use crate::session::{Session, SessionConfig};
use nestkv_core::LayeredStore;
use std::io;
use tracing::info;

/// Runs an interactive session over stdin and stdout.
pub fn run(config: SessionConfig) -> CliResult<()> {
    info!("Starting session on stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::new(LayeredStore::new(), config);
    let end = session.run(stdin.lock(), &mut out)?;

    info!(?end, depth = %session.store().depth(), "Session finished");
    Ok(())
}
