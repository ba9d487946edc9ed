// src/exec/mod.rs

//! Pty command runner.
//!
//! - [`pty`] allocates the pseudo-terminal and starts the child on it.
//! - [`signals`] relays window-size changes and interrupt/terminate requests.
//! - [`stdin`] forwards our stdin into the pty.
//! - [`shell`] decides what to run from the positional arguments.
//! - [`runner`] ties the activities together and translates the exit status.

pub mod pty;
pub mod runner;
pub mod shell;
pub mod signals;
pub mod stdin;

pub use runner::{CommandRunner, SIGNAL_EXIT_BASE, exit_code, run_command};
pub use shell::{Invocation, login_shell, resolve_invocation_with};
