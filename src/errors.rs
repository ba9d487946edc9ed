// src/errors.rs

//! Crate-wide error type.
//!
//! Only configuration, format, and process-start failures (plus an
//! unexpected failure of the final wait) ever reach the caller. Relay
//! failures during a run are logged where they happen.

use thiserror::Error;

pub use crate::format::FormatError;

#[derive(Error, Debug)]
pub enum EtsError {
    #[error("{0}")]
    ConfigError(String),

    #[error("invalid format: {0}")]
    FormatError(#[from] FormatError),

    #[error("failed to start '{command}': {source}")]
    ProcessStart {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to allocate pty: {0}")]
    PtyError(#[from] nix::Error),

    #[error("failed to wait for child process: {0}")]
    WaitError(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EtsError>;
