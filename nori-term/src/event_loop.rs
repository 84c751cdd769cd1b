//! The main loop: one thread polling the PTY master and stdin.
//!
//! Bytes from the shell go through [`Terminal::process`] and trigger a
//! repaint; bytes from stdin are queued and drained into the PTY whenever it
//! is writable. Both directions keep a short history ring for debugging.

use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, BorrowedFd};
use std::time::Duration;

use log::{debug, info, log_enabled, warn, Level};
use polling::{Event, Events, Poller};

use nori_pty::{Child, History, WriteQueue};

use crate::render;
use crate::term::Terminal;

const STDIN_KEY: usize = 0;
const PTY_KEY: usize = 1;

const HISTORY_BYTES: usize = 1024;

/// Run until the shell exits or stdin closes.
pub fn run(mut child: Child, mut terminal: Terminal) -> io::Result<()> {
    // Raw mode fails off a tty (tests, pipes); run cooked in that case.
    let _raw = match RawModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("stdin is not a terminal, running without raw mode: {e}");
            None
        }
    };

    child
        .set_nonblocking(true)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let poller = Poller::new()?;
    unsafe {
        poller.add(io::stdin().as_raw_fd(), Event::readable(STDIN_KEY))?;
        poller.add(child.master_fd(), Event::readable(PTY_KEY))?;
    }

    let mut events = Events::new();
    let mut stdin_buf = [0u8; 4096];
    let mut pty_buf = [0u8; 65536];
    let mut write_queue = WriteQueue::new();
    let mut read_history = History::<HISTORY_BYTES>::new();
    let mut write_history = History::<HISTORY_BYTES>::new();

    let exit_code = 'outer: loop {
        // Events are oneshot; re-arm both sources every pass. The PTY asks
        // for writability only while there is something to send.
        let interest = if write_queue.has_block() {
            Event::all(PTY_KEY)
        } else {
            Event::readable(PTY_KEY)
        };
        let stdin_fd = unsafe { BorrowedFd::borrow_raw(io::stdin().as_raw_fd()) };
        poller.modify(stdin_fd, Event::readable(STDIN_KEY))?;
        let master = unsafe { BorrowedFd::borrow_raw(child.master_fd()) };
        poller.modify(master, interest)?;

        events.clear();
        match poller.wait(&mut events, Some(Duration::from_millis(500))) {
            Ok(_) => {}
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }

        let mut dirty = false;
        for event in events.iter() {
            match event.key {
                STDIN_KEY => {
                    let n = io::stdin().read(&mut stdin_buf)?;
                    if n == 0 {
                        info!("stdin closed");
                        break 'outer None;
                    }
                    write_queue.push(&stdin_buf[..n]);
                }
                PTY_KEY => {
                    if event.readable && read_from_pty(
                        &mut child,
                        &mut pty_buf,
                        &mut terminal,
                        &mut read_history,
                        &mut dirty,
                    )? {
                        break 'outer child.try_wait()?;
                    }
                    if event.writable {
                        drain_one_block(&mut child, &mut write_queue, &mut write_history)?;
                    }
                }
                _ => {}
            }
        }

        if let Some(code) = child.try_wait()? {
            break Some(code);
        }
        if dirty {
            repaint(&terminal)?;
        }
    };

    if let Some(code) = exit_code {
        info!("shell exited with code {code}");
    }
    if log_enabled!(Level::Debug) {
        let mut dump = Vec::new();
        read_history.dump(&mut dump)?;
        debug!("last bytes read from the pty:\n{}", String::from_utf8_lossy(&dump));
        dump.clear();
        write_history.dump(&mut dump)?;
        debug!("last bytes written to the pty:\n{}", String::from_utf8_lossy(&dump));
    }
    Ok(())
}

/// Drain everything the PTY has for us. Returns true on EOF (slave side
/// closed, i.e. the shell is gone).
fn read_from_pty<const N: usize>(
    child: &mut Child,
    buf: &mut [u8],
    terminal: &mut Terminal,
    history: &mut History<N>,
    dirty: &mut bool,
) -> io::Result<bool> {
    loop {
        match child.read(buf) {
            Ok(0) => return Ok(true),
            Ok(n) => {
                history.write(&buf[..n]);
                terminal.process(&buf[..n]);
                *dirty = true;
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
            // Linux reports EIO on the master once the slave side is gone.
            Err(ref e) if e.raw_os_error() == Some(nix::libc::EIO) => return Ok(true),
            Err(e) => return Err(e),
        }
    }
}

/// Write the queue's front block, consuming only what the kernel accepted.
fn drain_one_block<const N: usize>(
    child: &mut Child,
    queue: &mut WriteQueue,
    history: &mut History<N>,
) -> io::Result<()> {
    if !queue.has_block() {
        return Ok(());
    }
    let written = {
        let block = queue.peek_block();
        match child.write(block) {
            Ok(n) => {
                history.write(&block[..n]);
                n
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => 0,
            Err(e) => return Err(e),
        }
    };
    queue.shift(written);
    Ok(())
}

fn repaint(terminal: &Terminal) -> io::Result<()> {
    let mut out = io::stdout().lock();
    // Home the cursor and clear before painting the whole grid.
    out.write_all(b"\x1b[H\x1b[2J")?;
    render::render(terminal.grid(), &mut out)?;
    out.flush()
}

/// Puts the controlling terminal into raw-ish mode for the lifetime of the
/// guard: no echo, no line buffering, no signal keys.
struct RawModeGuard {
    saved: nix::sys::termios::Termios,
}

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices};

        let saved = termios::tcgetattr(io::stdin())
            .map_err(|e| io::Error::from_raw_os_error(e as i32))?;

        let mut raw = saved.clone();
        raw.local_flags.remove(LocalFlags::ICANON);
        raw.local_flags.remove(LocalFlags::ECHO);
        raw.local_flags.remove(LocalFlags::ISIG);
        raw.local_flags.remove(LocalFlags::IEXTEN);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

        termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &raw)
            .map_err(|e| io::Error::from_raw_os_error(e as i32))?;
        Ok(RawModeGuard { saved })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        use nix::sys::termios::{self, SetArg};
        let _ = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &self.saved);
    }
}
