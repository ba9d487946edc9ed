// src/exec/shell.rs

//! Turning positional arguments into something to run.

use std::sync::LazyLock;

use nix::unistd::{User, getuid};
use regex::Regex;
use tracing::debug;

/// Shell used when the login shell cannot be determined.
pub const DEFAULT_SHELL: &str = "sh";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("whitespace pattern is valid"));

/// Where timestamped lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No command: read our own stdin.
    Stdin,
    /// Run `argv` in a pty.
    Command(Vec<String>),
}

/// Resolve positional arguments with a caller-provided shell lookup.
///
/// - no arguments → [`Invocation::Stdin`]
/// - exactly one argument containing whitespace → `[shell, "-c", arg]`
/// - anything else → the arguments as-is
pub fn resolve_invocation_with<F>(mut args: Vec<String>, shell: F) -> Invocation
where
    F: FnOnce() -> String,
{
    match args.len() {
        0 => Invocation::Stdin,
        1 if WHITESPACE.is_match(&args[0]) => {
            let script = args.remove(0);
            Invocation::Command(vec![shell(), "-c".to_string(), script])
        }
        _ => Invocation::Command(args),
    }
}

/// The current user's login shell.
///
/// Taken from the passwd entry, then `$SHELL`, then [`DEFAULT_SHELL`].
pub fn login_shell() -> String {
    match User::from_uid(getuid()) {
        Ok(Some(user)) if !user.shell.as_os_str().is_empty() => {
            return user.shell.to_string_lossy().into_owned();
        }
        Ok(_) => debug!("no login shell in passwd entry"),
        Err(e) => debug!(error = %e, "passwd lookup failed"),
    }

    std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}
