//! Nori PTY Management
//!
//! Linux pseudo-terminal plumbing for the terminal frontend:
//! - opening a PTY pair and spawning a shell attached to its slave side
//! - window size propagation (TIOCSWINSZ + SIGWINCH)
//! - non-blocking reads/writes on the master
//! - the byte queues used around the master: a history ring for debugging
//!   and a block queue for the write side

pub mod buffers;
pub mod child;
pub mod error;
pub mod size;

pub use buffers::{History, WriteQueue};
pub use child::Child;
pub use error::PtyError;
pub use size::WindowSize;
