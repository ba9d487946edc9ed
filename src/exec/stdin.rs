// src/exec/stdin.rs

use std::fs::File;
use std::io::{self, Read};
use std::thread;

use tracing::{debug, warn};

/// Copy `input` into the pty on a dedicated OS thread until either side
/// closes.
///
/// The thread is detached: blocking reads on a terminal cannot be
/// interrupted, so it may outlive the child and is torn down with the
/// process.
pub fn spawn_stdin_forwarder<R>(mut input: R, mut pty: File) -> io::Result<thread::JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("stdin-forward".to_string())
        .spawn(move || match io::copy(&mut input, &mut pty) {
            Ok(bytes) => debug!(bytes, "stdin forwarding finished"),
            Err(e) => warn!("error forwarding stdin to pty: {e}"),
        })
}
