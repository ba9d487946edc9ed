// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{ArgAction, Parser, ValueEnum};

const LONG_ABOUT: &str = "\
ets prefixes each line of a command's output with a timestamp.

The three usage forms correspond to three command execution modes:

* If given a single command without whitespace, or a command and its
  arguments, execute the command in a pty;

* If given a single command with whitespace, the command is treated as a
  shell command and executed as SHELL -c shell_command, where SHELL is the
  current user's login shell, or sh if it cannot be determined;

* If given no command, output is read from stdin, and the user is
  responsible for piping in a command's output.

There are three mutually exclusive timestamp modes:

* The default is absolute time mode, where timestamps from the wall clock
  are shown;

* -s, --elapsed turns on elapsed time mode, where every timestamp is the
  time elapsed from the start of the command (using a monotonic clock);

* -i, --incremental turns on incremental time mode, where every timestamp is
  the time elapsed since the last timestamp (using a monotonic clock).

The default format is \"[%F %T]\" in absolute mode and \"[%T]\" otherwise.
The format string is a strftime(3)-style string; %L, %f and %N give
milliseconds, microseconds and nanoseconds. Calendar and zone directives
are rejected in elapsed and incremental mode.

The time zone for absolute timestamps is controlled by -u, --utc and
-z, --timezone (an IANA name such as America/Los_Angeles). Local time is
used by default.";

/// Command-line arguments for `ets`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ets",
    version,
    about = "Prefix each line of a command's output with a timestamp.",
    long_about = LONG_ABOUT,
    override_usage = "ets [-s | -i] [-f format] [-u | -z timezone] command [arg ...]\n       \
                      ets [options] shell_command\n       \
                      ets [options]",
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Show elapsed timestamps.
    #[arg(short = 's', long)]
    pub elapsed: bool,

    /// Show incremental timestamps.
    #[arg(short = 'i', long)]
    pub incremental: bool,

    /// Show timestamps in this format.
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Show absolute timestamps in UTC.
    #[arg(short = 'u', long)]
    pub utc: bool,

    /// Show absolute timestamps in this time zone, e.g. America/New_York.
    #[arg(short = 'z', long, value_name = "TIMEZONE")]
    pub timezone: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ETS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print version and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Command to run, or a single shell command line. Reads stdin if empty.
    ///
    /// Option parsing stops at the first positional argument.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
