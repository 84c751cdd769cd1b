//! Terminal window size, as the kernel sees it.

use std::io;
use std::os::unix::io::RawFd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
    /// Pixel dimensions are advisory and may be zero.
    pub pixel_width: u16,
    pub pixel_height: u16,
}

impl WindowSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        WindowSize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    pub fn to_winsize(self) -> libc::winsize {
        libc::winsize {
            ws_row: self.rows,
            ws_col: self.cols,
            ws_xpixel: self.pixel_width,
            ws_ypixel: self.pixel_height,
        }
    }

    pub fn from_winsize(ws: libc::winsize) -> Self {
        WindowSize {
            rows: ws.ws_row,
            cols: ws.ws_col,
            pixel_width: ws.ws_xpixel,
            pixel_height: ws.ws_ypixel,
        }
    }

    /// Push this size onto a PTY master via TIOCSWINSZ.
    pub fn set_on_fd(self, fd: RawFd) -> io::Result<()> {
        let ws = self.to_winsize();
        if unsafe { libc::ioctl(fd, libc::TIOCSWINSZ, &ws) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Read the current size of a PTY via TIOCGWINSZ.
    pub fn get_from_fd(fd: RawFd) -> io::Result<Self> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        if unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self::from_winsize(ws))
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize::new(25, 80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winsize_round_trip() {
        let size = WindowSize {
            rows: 30,
            cols: 100,
            pixel_width: 800,
            pixel_height: 600,
        };
        assert_eq!(WindowSize::from_winsize(size.to_winsize()), size);
    }

    #[test]
    fn default_matches_the_classic_screen() {
        let size = WindowSize::default();
        assert_eq!((size.rows, size.cols), (25, 80));
        assert_eq!((size.pixel_width, size.pixel_height), (0, 0));
    }
}
