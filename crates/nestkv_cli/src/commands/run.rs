//! Run command implementation.

use crate::error::CliResult;
use crate::session::{Session, SessionConfig, SessionEnd};
use nestkv_core::LayeredStore;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Executes the script at `path`, writing replies to stdout.
pub fn run(path: &Path, config: SessionConfig) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_to(path, config, &mut out)?;
    Ok(())
}

/// Executes the script at `path`, writing replies to `out`.
pub fn run_to<W: Write>(path: &Path, config: SessionConfig, out: &mut W) -> CliResult<SessionEnd> {
    info!("Running script {:?}", path);

    let file = File::open(path)?;
    let mut session = Session::new(LayeredStore::new(), config);
    let end = session.run(BufReader::new(file), out)?;

    let depth = session.store().depth();
    if !depth.is_root() {
        info!(
            open = depth.open_transactions(),
            "Script ended with open transactions; they are discarded"
        );
    }
    Ok(end)
}
