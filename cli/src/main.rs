#![deny(missing_docs)]

//! # Viewcraft CLI
//!
//! Command Line Interface for the read-only view post-processor.
//!
//! Supported Commands:
//! - `apply`: Rewrites generated sources of view entities as read-only,
//!   writes their view changelogs and generates MyBatis mappers.

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod apply;
mod error;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Viewcraft CLI")]
struct Cli {
    /// Log filter (`error`, `warn`, `info`, `debug`, `trace` or a directive list).
    #[clap(long, global = true, default_value = "info", env = "VIEWCRAFT_LOG")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post-process generated sources for view and MyBatis entities.
    Apply(apply::ApplyArgs),
}

fn init_logging(level: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A global tracing subscriber is already installed");
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Commands::Apply(args) => {
            apply::execute(args)?;
        }
    }

    Ok(())
}
