use std::io::{self, Read};

use crate::Scanner;

/// Delivers at most one to three bytes per call, exercising every refill
/// path in the window reader. Ported from the classic "small reader" test
/// harness: the chunk size cycles 3, 1, 4, 2, ...
pub(crate) struct TrickleReader<R> {
    inner: R,
    n: usize,
}

impl<R> TrickleReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, n: 0 }
    }
}

impl<R: Read> Read for TrickleReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.n = (self.n + 3) % 5;
        if self.n < 1 {
            self.n = 1;
        }
        let cap = self.n.min(buf.len());
        self.inner.read(&mut buf[..cap])
    }
}

/// Replays `data` in chunks of the given sizes, cycling through `sizes`.
/// Zero-byte chunks are bumped to one byte so the stream always makes
/// progress.
pub(crate) struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    sizes: Vec<usize>,
    turn: usize,
}

impl ChunkedReader {
    pub(crate) fn new(data: Vec<u8>, sizes: Vec<usize>) -> Self {
        Self {
            data,
            pos: 0,
            sizes,
            turn: 0,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return Ok(0);
        }
        let size = if self.sizes.is_empty() {
            1
        } else {
            self.sizes[self.turn % self.sizes.len()].max(1)
        };
        self.turn += 1;
        let n = size.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Collects every remaining token as an owned byte vector.
pub(crate) fn collect_tokens<R: Read>(scanner: &mut Scanner<R>) -> Vec<Vec<u8>> {
    let mut tokens = Vec::new();
    while let Some(tok) = scanner.next() {
        tokens.push(tok.to_vec());
    }
    tokens
}

/// Scans `input` through a [`TrickleReader`] and returns the tokens as
/// strings.
pub(crate) fn scan_str(input: &str) -> Vec<String> {
    let mut scanner = Scanner::new(TrickleReader::new(input.as_bytes()));
    collect_tokens(&mut scanner)
        .into_iter()
        .map(|tok| String::from_utf8(tok).expect("token is valid UTF-8"))
        .collect()
}
