//! A sliding buffered window over a pull-based byte source.
//!
//! `ByteReader` owns a contiguous byte buffer and presents the unconsumed
//! portion of it as a *window*. Consumers walk the window, `release` the
//! prefix they are done with, and call `extend` to pull more bytes from the
//! source. Refills reuse the space freed by `release` where possible, so a
//! stream of bounded-size tokens is scanned without reallocating.

use std::io::{self, ErrorKind, Read};

/// Size of a freshly grown buffer, and the floor for every reallocation.
pub(crate) const NEW_BUFFER_SIZE: usize = 8192;

/// Minimum free space demanded before issuing a read. Reading into slivers
/// wastes syscalls; below this threshold the buffer is compacted or grown
/// first.
const MIN_READ_SIZE: usize = NEW_BUFFER_SIZE >> 2;

/// A refillable window over an [`io::Read`] source.
///
/// Layout of the owned buffer:
///
/// ```text
/// +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
/// | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | a | b | c | d | e | f |
/// +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///   ^       ^                       ^                           ^
///   |       `- released             `- len                      `- capacity
///   |       `------ window() -------+
///   `- buf
/// ```
///
/// Bytes before `released` are logically consumed and may be overwritten by
/// future refills. `window()` is invalidated by `release` and `extend`.
#[derive(Debug)]
pub(crate) struct ByteReader<R> {
    buf: Box<[u8]>,
    released: usize,
    len: usize,
    src: R,
    err: Option<io::Error>,
    eof: bool,
}

impl<R: Read> ByteReader<R> {
    pub(crate) fn with_capacity(src: R, capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            released: 0,
            len: 0,
            src,
            err: None,
            eof: false,
        }
    }

    /// Returns the current window of unconsumed bytes.
    #[inline]
    pub(crate) fn window(&self) -> &[u8] {
        &self.buf[self.released..self.len]
    }

    /// Discards `n` bytes from the front of the window.
    #[inline]
    pub(crate) fn release(&mut self, n: usize) {
        debug_assert!(self.released + n <= self.len);
        self.released += n;
    }

    /// Returns the sticky source error, if any. Clean end-of-stream is not
    /// an error; after it, `extend` simply keeps returning zero.
    pub(crate) fn error(&self) -> Option<&io::Error> {
        self.err.as_ref()
    }

    /// Pulls more bytes from the source into the window, making room first
    /// if necessary. Returns the number of bytes read; zero means the source
    /// is exhausted or has failed (see [`error`](Self::error)).
    ///
    /// Three-tier refill policy: read into the tail if enough capacity is
    /// free, otherwise compact the window to the front, otherwise grow to
    /// `max(2 * capacity, NEW_BUFFER_SIZE)`.
    pub(crate) fn extend(&mut self) -> usize {
        if self.err.is_some() || self.eof {
            return 0;
        }

        if self.released == self.len {
            self.released = 0;
            self.len = 0;
        }
        let remaining = self.len - self.released;
        if self.buf.len() - self.len >= MIN_READ_SIZE {
            // enough space between len and capacity, read into the tail
        } else if self.buf.len() - remaining >= MIN_READ_SIZE {
            self.compact();
        } else {
            self.grow();
        }

        loop {
            match self.src.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    self.eof = true;
                    return 0;
                }
                Ok(n) => {
                    self.len += n;
                    return n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.err = Some(e);
                    return 0;
                }
            }
        }
    }

    /// Moves the window to the front of the buffer.
    fn compact(&mut self) {
        self.buf.copy_within(self.released..self.len, 0);
        self.len -= self.released;
        self.released = 0;
    }

    /// Reallocates, moving the window to the front of the new buffer.
    fn grow(&mut self) {
        let mut next = vec![0; usize::max(self.buf.len() * 2, NEW_BUFFER_SIZE)].into_boxed_slice();
        let remaining = self.len - self.released;
        next[..remaining].copy_from_slice(&self.buf[self.released..self.len]);
        self.buf = next;
        self.released = 0;
        self.len = remaining;
    }
}
