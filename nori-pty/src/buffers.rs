//! Byte queues used around the PTY master.
//!
//! [`History`] records the most recent traffic in one direction for
//! debugging. [`WriteQueue`] holds bytes destined for the PTY until the
//! master is writable; short writes consume only what the kernel took.

use std::io::{self, Write};

/// Fixed-size overwrite ring holding the last `N` bytes written to it.
pub struct History<const N: usize> {
    data: [u8; N],
    pos: usize,
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> History<N> {
    pub fn new() -> Self {
        History {
            data: [0; N],
            pos: 0,
        }
    }

    /// Record bytes, overwriting the oldest. Only the trailing `N` bytes of
    /// a large write can matter, so the head is skipped outright.
    pub fn write(&mut self, src: &[u8]) {
        let src = if src.len() > N {
            &src[src.len() - N..]
        } else {
            src
        };
        for &b in src {
            self.data[self.pos] = b;
            self.pos = (self.pos + 1) % N;
        }
    }

    /// The recorded bytes, oldest first.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(N);
        out.extend_from_slice(&self.data[self.pos..]);
        out.extend_from_slice(&self.data[..self.pos]);
        out
    }

    /// Print an ASCII + hex panel of the ring, oldest bytes first.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for chunk in self.bytes().chunks(32) {
            for &b in chunk {
                let shown = if b.is_ascii_graphic() { b as char } else { ' ' };
                write!(out, "{shown}  ")?;
            }
            writeln!(out)?;
            for &b in chunk {
                write!(out, "{b:02x} ")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

const BLOCK: usize = 1024;

/// Unbounded byte queue chained out of fixed blocks.
///
/// `peek_block` exposes the longest contiguous readable slice so a single
/// `write(2)` can drain it; `shift` consumes however much the kernel
/// actually accepted.
pub struct WriteQueue {
    blocks: std::collections::VecDeque<Box<[u8; BLOCK]>>,
    /// Read offset in the first block.
    start: usize,
    /// Write offset in the last block.
    limit: usize,
}

impl Default for WriteQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteQueue {
    pub fn new() -> Self {
        let mut blocks = std::collections::VecDeque::new();
        blocks.push_back(Box::new([0u8; BLOCK]));
        WriteQueue {
            blocks,
            start: 0,
            limit: 0,
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        let mut data = data;
        while !data.is_empty() {
            let back = self.blocks.back_mut().expect("queue always has a block");
            let count = data.len().min(BLOCK - self.limit);
            back[self.limit..self.limit + count].copy_from_slice(&data[..count]);
            self.limit += count;
            if self.limit == BLOCK {
                self.limit = 0;
                self.blocks.push_back(Box::new([0u8; BLOCK]));
            }
            data = &data[count..];
        }
    }

    pub fn has_block(&self) -> bool {
        self.blocks.len() > 1 || self.start != self.limit
    }

    /// The longest contiguous slice of queued bytes. Empty when the queue
    /// is drained.
    pub fn peek_block(&self) -> &[u8] {
        let front = self.blocks.front().expect("queue always has a block");
        if self.blocks.len() == 1 {
            &front[self.start..self.limit]
        } else {
            &front[self.start..]
        }
    }

    /// Consume `n` bytes from the front; `n` must not exceed the length of
    /// the last `peek_block`.
    pub fn shift(&mut self, n: usize) {
        self.start += n;
        debug_assert!(self.start <= BLOCK);
        if self.start == BLOCK {
            self.start = 0;
            self.blocks.pop_front();
        }
    }

    /// Total queued byte count.
    pub fn len(&self) -> usize {
        (self.blocks.len() - 1) * BLOCK + self.limit - self.start
    }

    pub fn is_empty(&self) -> bool {
        !self.has_block()
    }
}
