// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod format;
pub mod logging;
pub mod prefixer;
pub mod timestamp;
pub mod types;

use std::io;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::errors::Result;
use crate::exec::{Invocation, run_command};
use crate::prefixer::prefix_lines;
use crate::timestamp::Timestamper;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - option validation (conflicting flags, time zone, format)
/// - the timestamper
/// - either stdin prefixing or the pty command runner
///
/// Returns the exit code the process should end with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config = RunConfig::try_from(args)?;
    let timestamper = config.timestamper()?;
    info!(mode = %config.mode, format = %config.format, zone = %config.zone, "configured");

    match config.invocation {
        Invocation::Stdin => prefix_stdin(timestamper).await,
        Invocation::Command(argv) => run_command(&argv, timestamper).await,
    }
}

/// Timestamp our own stdin until it ends.
async fn prefix_stdin(mut timestamper: Timestamper) -> Result<i32> {
    let drained = tokio::task::spawn_blocking(move || {
        prefix_lines(io::stdin().lock(), io::stdout(), &mut timestamper)
    })
    .await
    .map_err(anyhow::Error::from)?;

    match drained {
        Ok(lines) => debug!(lines, "stdin drained"),
        // The reader went away (e.g. `| head`); nothing left to do.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => debug!("stdout closed"),
        Err(e) => return Err(e.into()),
    }
    Ok(0)
}
