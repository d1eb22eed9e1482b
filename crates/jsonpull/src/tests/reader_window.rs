use std::io::{self, Read};

use crate::reader::ByteReader;
use crate::tests::utils::TrickleReader;

/// Yields one byte per call, then fails every call after the data runs out.
struct FailAfter {
    data: &'static [u8],
    pos: usize,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.data.len() {
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        } else {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
        }
    }
}

/// Interrupts the first read, then delegates.
struct InterruptOnce<R> {
    inner: R,
    fired: bool,
}

impl<R: Read> Read for InterruptOnce<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.fired {
            self.fired = true;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        self.inner.read(buf)
    }
}

#[test]
fn window_release_extend() {
    let mut br = ByteReader::with_capacity(&b"hello world"[..], 0);
    assert!(br.window().is_empty());

    assert!(br.extend() > 0);
    assert_eq!(br.window(), b"hello world");

    br.release(6);
    assert_eq!(br.window(), b"world");

    // clean end of stream: zero bytes, no error
    assert_eq!(br.extend(), 0);
    assert!(br.error().is_none());
    assert_eq!(br.window(), b"world");
}

#[test]
fn byte_stream_survives_refills() {
    // A tiny initial capacity forces the grow path immediately; releasing as
    // we go then drives the tail-fit and compact paths for the rest of the
    // stream.
    let data: Vec<u8> = (0..=u8::MAX).cycle().take(40_000).collect();
    let mut br = ByteReader::with_capacity(TrickleReader::new(data.as_slice()), 32);

    let mut out = Vec::new();
    loop {
        if br.window().is_empty() && br.extend() == 0 {
            break;
        }
        let take = br.window().len().min(7);
        out.extend_from_slice(&br.window()[..take]);
        br.release(take);
    }

    assert_eq!(out, data);
    assert!(br.error().is_none());
}

#[test]
fn source_errors_are_sticky() {
    let mut br = ByteReader::with_capacity(FailAfter { data: b"[", pos: 0 }, 0);
    assert_eq!(br.extend(), 1);
    assert_eq!(br.window(), b"[");

    assert_eq!(br.extend(), 0);
    assert_eq!(
        br.error().map(io::Error::kind),
        Some(io::ErrorKind::ConnectionReset)
    );

    // still failed, still zero
    assert_eq!(br.extend(), 0);
    assert_eq!(
        br.error().map(io::Error::kind),
        Some(io::ErrorKind::ConnectionReset)
    );
}

#[test]
fn interrupted_reads_are_retried() {
    let mut br = ByteReader::with_capacity(
        InterruptOnce {
            inner: &b"data"[..],
            fired: false,
        },
        0,
    );
    assert_eq!(br.extend(), 4);
    assert_eq!(br.window(), b"data");
    assert!(br.error().is_none());
}
