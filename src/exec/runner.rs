// src/exec/runner.rs

//! Run a command in a pty and timestamp its output.

use std::fmt;
use std::io::{self, BufReader, Read, Write};
use std::os::fd::OwnedFd;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{EtsError, Result};
use crate::prefixer::prefix_lines;
use crate::timestamp::TimestampSource;

use super::pty::Pty;
use super::signals::{ChildGroup, RelaySignal, SignalListener, spawn_relay};
use super::stdin::spawn_stdin_forwarder;

/// Exit codes for children killed by a signal are `SIGNAL_EXIT_BASE + signo`.
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// Builder-style runner for one command.
///
/// Defaults: output to our stdout, our stdin forwarded into the pty, the
/// pty sized after our stdin terminal, and SIGWINCH/SIGINT/SIGTERM relayed
/// to the child.
pub struct CommandRunner<W = io::Stdout> {
    argv: Vec<String>,
    output: W,
    stdin: Option<Box<dyn Read + Send>>,
    window_size_from: Option<OwnedFd>,
    relay_signals: bool,
}

impl<W> fmt::Debug for CommandRunner<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRunner")
            .field("argv", &self.argv)
            .field("forwards_stdin", &self.stdin.is_some())
            .field("window_size_from", &self.window_size_from)
            .field("relay_signals", &self.relay_signals)
            .finish_non_exhaustive()
    }
}

impl CommandRunner<io::Stdout> {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            output: io::stdout(),
            stdin: Some(Box::new(io::stdin())),
            window_size_from: None,
            relay_signals: true,
        }
    }
}

impl<W: Write + Send + 'static> CommandRunner<W> {
    /// Write timestamped lines to `output` instead of stdout.
    pub fn output<O: Write + Send + 'static>(self, output: O) -> CommandRunner<O> {
        CommandRunner {
            argv: self.argv,
            output,
            stdin: self.stdin,
            window_size_from: self.window_size_from,
            relay_signals: self.relay_signals,
        }
    }

    /// Forward `input` to the child instead of our stdin.
    pub fn stdin<R: Read + Send + 'static>(mut self, input: R) -> Self {
        self.stdin = Some(Box::new(input));
        self
    }

    /// Do not forward any input to the child.
    pub fn no_stdin(mut self) -> Self {
        self.stdin = None;
        self
    }

    /// Take the pty size from `terminal` instead of our stdin.
    pub fn window_size_from<F: Into<OwnedFd>>(mut self, terminal: F) -> Self {
        self.window_size_from = Some(terminal.into());
        self
    }

    pub fn relay_signals(mut self, enabled: bool) -> Self {
        self.relay_signals = enabled;
        self
    }

    /// Run to completion and return the child's translated exit code.
    ///
    /// Returns only after the pty output is exhausted and the child has been
    /// waited on. Start failures and a failed wait are errors; everything
    /// else that goes wrong along the way is logged.
    pub async fn run<T>(self, timestamps: T) -> Result<i32>
    where
        T: TimestampSource + Send + 'static,
    {
        let command = self.argv.join(" ");
        let mut pty = Pty::open()?;
        let reader = pty.reader()?;

        // Handlers go in before the child exists so an early Ctrl-C is not lost.
        let listener = if self.relay_signals {
            match SignalListener::install() {
                Ok(listener) => Some(listener),
                Err(e) => {
                    warn!("error installing signal handlers: {e}");
                    None
                }
            }
        } else {
            None
        };

        // Sized before the child starts, so its first look at the terminal
        // already sees the right dimensions.
        let resizer = match pty.resizer(self.window_size_from) {
            Ok(resizer) => {
                if let Err(e) = resizer.sync() {
                    warn!("error setting initial pty size: {e}");
                }
                Some(resizer)
            }
            Err(e) => {
                warn!("error preparing pty resizer: {e}");
                None
            }
        };

        let mut child = pty
            .spawn(&self.argv)
            .map_err(|source| EtsError::ProcessStart {
                command: command.clone(),
                source,
            })?;
        let pid = child.id();
        info!(?pid, %command, "started command in pty");

        let mut relay_tasks = Vec::new();
        if let (Some(listener), Some(pid), Some(resizer)) = (listener, pid, resizer) {
            let (tx, rx) = mpsc::unbounded_channel();
            // Synthetic first notification, applied once the relay owns the pty.
            let _ = tx.send(RelaySignal::WindowChange);
            relay_tasks.push(spawn_relay(rx, ChildGroup::new(pid, resizer)));
            relay_tasks.push(listener.spawn(tx));
        }

        if let Some(input) = self.stdin {
            let forwarder = pty
                .writer()
                .and_then(|writer| spawn_stdin_forwarder(input, writer));
            if let Err(e) = forwarder {
                warn!("error starting stdin forwarding: {e}");
            }
        }

        let output = self.output;
        let drain = tokio::task::spawn_blocking(move || {
            let mut timestamps = timestamps;
            prefix_lines(BufReader::new(reader), output, &mut timestamps)
        });

        match drain.await {
            Ok(Ok(lines)) => debug!(lines, "pty output drained"),
            Ok(Err(e)) => warn!("error reading command output: {e}"),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => warn!("output drain did not finish: {e}"),
        }

        let status = child.wait().await.map_err(EtsError::WaitError);

        for task in relay_tasks {
            task.abort();
        }
        drop(pty);

        let code = exit_code(status?);
        info!(%command, exit_code = code, "command exited");
        Ok(code)
    }
}

/// Run `argv` in a pty with the default wiring (stdout, stdin, signals).
pub async fn run_command<T>(argv: &[String], timestamps: T) -> Result<i32>
where
    T: TimestampSource + Send + 'static,
{
    CommandRunner::new(argv.to_vec()).run(timestamps).await
}

/// Translate a wait status into our exit code.
///
/// A normal exit keeps its code; death by signal N becomes `128 + N`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    match status.signal() {
        Some(signo) => SIGNAL_EXIT_BASE + signo,
        None => 1,
    }
}
