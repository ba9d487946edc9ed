// src/exec/pty.rs

//! Pseudo-terminal allocation and the per-activity handles onto it.
//!
//! The master side is duplicated once per activity (drain reader, stdin
//! writer, resizer) so that every activity owns exactly the descriptor it
//! operates on. The original master is owned by [`Pty`] and closed when the
//! runner drops it.

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::os::fd::{AsFd, AsRawFd, OwnedFd};
use std::process::Stdio;

use nix::errno::Errno;
use nix::fcntl::{FcntlArg, FdFlag, fcntl};
use nix::pty::{Winsize, openpty};
use nix::sys::termios::Termios;
use nix::unistd::setsid;
use tokio::process::{Child, Command};
use tracing::debug;

nix::ioctl_read_bad!(get_window_size, nix::libc::TIOCGWINSZ, Winsize);
nix::ioctl_write_ptr_bad!(set_window_size, nix::libc::TIOCSWINSZ, Winsize);
nix::ioctl_write_int_bad!(set_controlling_terminal, nix::libc::TIOCSCTTY);

#[derive(Debug)]
pub struct Pty {
    master: OwnedFd,
    slave: Option<OwnedFd>,
}

impl Pty {
    /// Allocate a new pseudo-terminal pair.
    ///
    /// Both descriptors are close-on-exec: the child only ever sees the
    /// slave through its standard streams.
    pub fn open() -> nix::Result<Self> {
        let pair = openpty(None::<&Winsize>, None::<&Termios>)?;
        for fd in [&pair.master, &pair.slave] {
            fcntl(fd, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
        }
        debug!(
            master = pair.master.as_raw_fd(),
            slave = pair.slave.as_raw_fd(),
            "allocated pty"
        );
        Ok(Self {
            master: pair.master,
            slave: Some(pair.slave),
        })
    }

    /// Handle used by the output drain.
    pub fn reader(&self) -> io::Result<PtyReader> {
        Ok(PtyReader {
            inner: File::from(self.master.try_clone()?),
        })
    }

    /// Handle used by stdin forwarding.
    pub fn writer(&self) -> io::Result<File> {
        Ok(File::from(self.master.try_clone()?))
    }

    /// Handle used by the signal relay to propagate window size changes.
    ///
    /// The size is copied from `terminal` when given, otherwise from our
    /// own stdin.
    pub fn resizer(&self, terminal: Option<OwnedFd>) -> io::Result<PtyResizer> {
        Ok(PtyResizer {
            master: self.master.try_clone()?,
            terminal,
        })
    }

    /// Start `argv` as a session leader whose controlling terminal is the
    /// slave side of this pty.
    ///
    /// The slave descriptor is handed to the child and closed in this
    /// process once the command is spawned; otherwise reads on the master
    /// would never see end of stream.
    pub fn spawn(&mut self, argv: &[String]) -> io::Result<Child> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
        let slave = self
            .slave
            .take()
            .ok_or_else(|| io::Error::other("pty slave already handed to a child"))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::from(slave.try_clone()?))
            .stdout(Stdio::from(slave.try_clone()?))
            .stderr(Stdio::from(slave));

        // SAFETY: only async-signal-safe calls (setsid, ioctl) run between
        // fork and exec.
        unsafe {
            command.pre_exec(|| {
                setsid()?;
                set_controlling_terminal(0, 0)?;
                Ok(())
            });
        }

        command.spawn()
    }
}

/// Reader over the pty master that reports end of stream once the child
/// side is gone.
///
/// Linux returns `EIO` from a master read after the last slave descriptor is
/// closed; that is the pty's way of saying EOF.
#[derive(Debug)]
pub struct PtyReader {
    inner: File,
}

impl Read for PtyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Err(e) if e.raw_os_error() == Some(Errno::EIO as i32) => Ok(0),
            other => other,
        }
    }
}

#[derive(Debug)]
pub struct PtyResizer {
    master: OwnedFd,
    terminal: Option<OwnedFd>,
}

impl PtyResizer {
    /// Copy the current size of the source terminal onto the pty.
    pub fn sync(&self) -> nix::Result<()> {
        match &self.terminal {
            Some(terminal) => self.inherit_from(terminal),
            None => self.inherit_from_stdin(),
        }
    }

    /// Copy the window size of our own stdin terminal onto the pty.
    ///
    /// A no-op when stdin is not a terminal.
    pub fn inherit_from_stdin(&self) -> nix::Result<()> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!("stdin is not a terminal; leaving pty size unchanged");
            return Ok(());
        }
        self.inherit_from(stdin.as_fd())
    }

    pub fn inherit_from<F: AsFd>(&self, terminal: F) -> nix::Result<()> {
        let mut size = Winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: both descriptors are valid for the duration of the calls
        // and `size` outlives them.
        unsafe {
            get_window_size(terminal.as_fd().as_raw_fd(), &mut size)?;
            set_window_size(self.master.as_raw_fd(), &size)?;
        }
        debug!(rows = size.ws_row, cols = size.ws_col, "resized pty");
        Ok(())
    }
}
