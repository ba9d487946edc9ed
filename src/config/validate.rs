// src/config/validate.rs

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::errors::{EtsError, Result};
use crate::exec::shell::{Invocation, login_shell, resolve_invocation_with};
use crate::timestamp::Zone;
use crate::types::TimeMode;

impl TryFrom<CliArgs> for RunConfig {
    type Error = EtsError;

    fn try_from(args: CliArgs) -> std::result::Result<Self, Self::Error> {
        RunConfig::from_args_with_shell(args, login_shell)
    }
}

impl RunConfig {
    /// Like `RunConfig::try_from`, with a caller-provided login shell lookup.
    pub fn from_args_with_shell<F>(args: CliArgs, shell: F) -> Result<Self>
    where
        F: FnOnce() -> String,
    {
        let mode = resolve_mode(&args)?;
        let zone = resolve_zone(&args)?;
        let format = resolve_format(&args, mode);
        let invocation = resolve_invocation_with(args.command, shell);

        Ok(RunConfig {
            mode,
            format,
            zone,
            invocation,
        })
    }

    /// Whether this run reads our own stdin rather than spawning a command.
    pub fn reads_stdin(&self) -> bool {
        self.invocation == Invocation::Stdin
    }
}

fn resolve_mode(args: &CliArgs) -> Result<TimeMode> {
    match (args.elapsed, args.incremental) {
        (true, true) => Err(EtsError::ConfigError(
            "conflicting flags --elapsed and --incremental".to_string(),
        )),
        (true, false) => Ok(TimeMode::Elapsed),
        (false, true) => Ok(TimeMode::Incremental),
        (false, false) => Ok(TimeMode::Absolute),
    }
}

fn resolve_zone(args: &CliArgs) -> Result<Zone> {
    let name = args.timezone.as_deref().filter(|s| !s.is_empty());

    match (args.utc, name) {
        (true, Some(_)) => Err(EtsError::ConfigError(
            "conflicting flags --utc and --timezone".to_string(),
        )),
        (true, None) => Ok(Zone::Utc),
        (false, Some(name)) => name.parse::<Zone>().map_err(EtsError::ConfigError),
        (false, None) => Ok(Zone::system()),
    }
}

fn resolve_format(args: &CliArgs, mode: TimeMode) -> String {
    match args.format.as_deref() {
        Some(format) if !format.is_empty() => format.to_string(),
        _ => mode.default_format().to_string(),
    }
}
