// src/exec/signals.rs

//! Signal relay between `ets` and the child's process group.
//!
//! OS signals are turned into [`RelaySignal`] values on an unbounded queue by
//! a [`SignalListener`]; a single relay task consumes the queue and turns
//! each entry into one targeted action on a [`RelayTarget`]:
//!
//! - `WindowChange` → copy the controlling terminal's size onto the pty.
//! - `Interrupt` / `Terminate` → deliver the same signal to the whole
//!   process group of the child, so descendants it spawned get it too.
//!
//! Failures are logged and never end the relay.

use std::io;

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::signal::unix::{self, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::pty::PtyResizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySignal {
    WindowChange,
    Interrupt,
    Terminate,
}

impl RelaySignal {
    /// The signal forwarded to the child group, if this one is forwarded.
    pub fn forwarded(self) -> Option<Signal> {
        match self {
            RelaySignal::WindowChange => None,
            RelaySignal::Interrupt => Some(Signal::SIGINT),
            RelaySignal::Terminate => Some(Signal::SIGTERM),
        }
    }
}

/// What the relay acts upon.
///
/// Production uses [`ChildGroup`]; tests can record the calls instead.
pub trait RelayTarget: Send + 'static {
    fn resize(&mut self) -> Result<()>;
    fn signal_group(&mut self, signal: Signal) -> Result<()>;
}

/// The running child: its process group and the pty it is attached to.
#[derive(Debug)]
pub struct ChildGroup {
    pgid: Pid,
    resizer: PtyResizer,
}

impl ChildGroup {
    /// `pid` must be a session (and therefore group) leader.
    pub fn new(pid: u32, resizer: PtyResizer) -> Self {
        Self {
            pgid: Pid::from_raw(pid as i32),
            resizer,
        }
    }
}

impl RelayTarget for ChildGroup {
    fn resize(&mut self) -> Result<()> {
        self.resizer
            .sync()
            .context("resizing pty to match the controlling terminal")
    }

    fn signal_group(&mut self, signal: Signal) -> Result<()> {
        match killpg(self.pgid, signal) {
            // The group is already gone; nothing left to signal.
            Err(Errno::ESRCH) => {
                debug!(pgid = %self.pgid, ?signal, "process group already exited");
                Ok(())
            }
            other => other.with_context(|| {
                format!("sending {signal} to process group {}", self.pgid)
            }),
        }
    }
}

/// Installed OS signal handlers, not yet forwarding anywhere.
///
/// Installing happens before the child is started so that no interrupt is
/// missed between spawn and relay start.
#[derive(Debug)]
pub struct SignalListener {
    window_change: unix::Signal,
    interrupt: unix::Signal,
    terminate: unix::Signal,
}

impl SignalListener {
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            window_change: unix::signal(SignalKind::window_change())?,
            interrupt: unix::signal(SignalKind::interrupt())?,
            terminate: unix::signal(SignalKind::terminate())?,
        })
    }

    /// Forward every received signal onto `tx` until the queue is closed.
    pub fn spawn(mut self, tx: mpsc::UnboundedSender<RelaySignal>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    Some(()) = self.window_change.recv() => RelaySignal::WindowChange,
                    Some(()) = self.interrupt.recv() => RelaySignal::Interrupt,
                    Some(()) = self.terminate.recv() => RelaySignal::Terminate,
                    else => break,
                };

                debug!(signal = ?received, "received signal");
                if tx.send(received).is_err() {
                    break;
                }
            }
            debug!("signal listener finished");
        })
    }
}

/// Spawn the relay task consuming `rx`.
pub fn spawn_relay<T: RelayTarget>(
    rx: mpsc::UnboundedReceiver<RelaySignal>,
    target: T,
) -> JoinHandle<()> {
    tokio::spawn(relay_signals(rx, target))
}

/// Apply queued signals to `target`, in order, until the queue closes.
pub async fn relay_signals<T: RelayTarget>(
    mut rx: mpsc::UnboundedReceiver<RelaySignal>,
    mut target: T,
) {
    while let Some(received) = rx.recv().await {
        match received.forwarded() {
            None => {
                if let Err(e) = target.resize() {
                    warn!("error resizing pty: {e:#}");
                }
            }
            Some(signal) => {
                info!(?signal, "forwarding signal to child process group");
                if let Err(e) = target.signal_group(signal) {
                    warn!("error forwarding {signal}: {e:#}");
                }
            }
        }
    }
    debug!("signal relay finished");
}
