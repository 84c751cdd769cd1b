//! Error type for PTY operations.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PtyError {
    #[error("failed to open PTY pair: {0}")]
    OpenPty(#[source] nix::Error),

    #[error("failed to fork child process: {0}")]
    Fork(#[source] nix::Error),

    #[error("failed to signal child process: {0}")]
    Signal(#[source] nix::Error),

    #[error("failed to set non-blocking mode: {0}")]
    SetNonBlocking(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
