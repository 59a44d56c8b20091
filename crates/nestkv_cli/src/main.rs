//! NestKV CLI
//!
//! Line-oriented command interpreter for the NestKV store.
//!
//! # Commands
//!
//! - `repl` - Read commands from stdin (default)
//! - `run` - Execute a script file
//! - `version` - Show version information

mod commands;
mod error;
mod parse;
mod session;

use clap::{Parser, Subcommand};
use session::{SessionConfig, StatsFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// NestKV command interpreter.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Echo each command before its result
    #[arg(global = true, short, long)]
    echo: bool,

    /// Prompt printed before each command is read
    #[arg(global = true, long)]
    prompt: Option<String>,

    /// Print store statistics when the session ends
    #[arg(global = true, long, value_enum)]
    stats: Option<StatsFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin until END or end of input
    Repl,

    /// Execute commands from a script file
    Run {
        /// Path to the script
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig {
        prompt: cli.prompt,
        echo: cli.echo,
        stats: cli.stats,
    };

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(config)?,
        Commands::Run { file } => commands::run::run(&file, config)?,
        Commands::Version => {
            println!("NestKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("NestKV Core v{}", nestkv_core::VERSION);
        }
    }

    Ok(())
}
