//! Spawning a shell on the slave side of a PTY.
//!
//! The parent keeps the master end wrapped in a [`Child`]; the forked child
//! becomes a session leader, takes the slave as its controlling terminal,
//! dups it over stdio, and execs the shell. Failures after the fork cannot
//! be reported upward and exit the child immediately.

use std::ffi::CString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};
use std::process;

use nix::pty::{openpty, OpenptyResult};
use nix::sys::signal::{self, Signal};
use nix::sys::termios::Termios;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::error::PtyError;
use crate::size::WindowSize;

/// A shell process attached to the slave side of a PTY.
pub struct Child {
    master: File,
    pid: Pid,
}

impl Child {
    /// Fork a shell on a fresh PTY.
    ///
    /// `shell` overrides the command; the default is `$SHELL`, falling back
    /// to `/bin/sh`.
    pub fn spawn_shell(shell: Option<&str>, size: WindowSize) -> Result<Child, PtyError> {
        let shell = shell
            .map(str::to_owned)
            .or_else(|| std::env::var("SHELL").ok())
            .unwrap_or_else(|| "/bin/sh".to_string());

        let ws = size.to_winsize();
        let OpenptyResult { master, slave } =
            openpty(Some(&ws), None::<&Termios>).map_err(PtyError::OpenPty)?;

        match unsafe { unistd::fork() }.map_err(PtyError::Fork)? {
            ForkResult::Parent { child } => {
                drop(slave);
                Ok(Child {
                    master: File::from(master),
                    pid: child,
                })
            }
            ForkResult::Child => {
                drop(master);
                exec_shell(slave, &shell)
            }
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn master_fd(&self) -> RawFd {
        self.master.as_raw_fd()
    }

    /// Toggle O_NONBLOCK on the master.
    pub fn set_nonblocking(&self, on: bool) -> Result<(), PtyError> {
        let fd = self.master_fd();
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(PtyError::SetNonBlocking(io::Error::last_os_error()));
        }
        let flags = if on {
            flags | libc::O_NONBLOCK
        } else {
            flags & !libc::O_NONBLOCK
        };
        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags) } < 0 {
            return Err(PtyError::SetNonBlocking(io::Error::last_os_error()));
        }
        Ok(())
    }

    /// Propagate a new window size to the kernel and wake the child.
    pub fn resize(&self, size: WindowSize) -> Result<(), PtyError> {
        size.set_on_fd(self.master_fd())?;
        signal::kill(self.pid, Signal::SIGWINCH).map_err(PtyError::Signal)
    }

    pub fn size(&self) -> Result<WindowSize, PtyError> {
        Ok(WindowSize::get_from_fd(self.master_fd())?)
    }

    /// Reap the child if it has exited. Returns the exit code, with killing
    /// signals mapped shell-style to 128 + signo.
    pub fn try_wait(&self) -> io::Result<Option<i32>> {
        match waitpid(self.pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => Ok(Some(code)),
            Ok(WaitStatus::Signaled(_, sig, _)) => Ok(Some(128 + sig as i32)),
            Ok(_) => Ok(None),
            Err(nix::errno::Errno::ECHILD) => Ok(Some(0)),
            Err(e) => Err(io::Error::from_raw_os_error(e as i32)),
        }
    }

    pub fn kill(&self) -> Result<(), PtyError> {
        signal::kill(self.pid, Signal::SIGKILL).map_err(PtyError::Signal)
    }
}

impl Read for Child {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.master.read(buf)
    }
}

impl Write for Child {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.master.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.master.flush()
    }
}

impl AsRawFd for Child {
    fn as_raw_fd(&self) -> RawFd {
        self.master_fd()
    }
}

impl Drop for Child {
    fn drop(&mut self) {
        // Reap if already dead so the child does not linger as a zombie.
        let _ = self.try_wait();
    }
}

/// Runs in the forked child; never returns.
fn exec_shell(slave: OwnedFd, shell: &str) -> ! {
    if unistd::setsid().is_err() {
        process::exit(1);
    }
    let fd = slave.as_raw_fd();
    if unsafe { libc::ioctl(fd, libc::TIOCSCTTY, 0) } < 0 {
        process::exit(1);
    }
    for target in 0..=2 {
        if unistd::dup2(fd, target).is_err() {
            process::exit(1);
        }
    }
    drop(slave);

    std::env::set_var("TERM", "xterm-256color");

    let Ok(prog) = CString::new(shell) else {
        process::exit(1);
    };
    let argv = [prog.clone()];
    let _ = unistd::execvp(&prog, &argv);
    process::exit(1);
}
