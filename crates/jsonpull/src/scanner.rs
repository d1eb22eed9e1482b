//! The streaming JSON lexer.
//!
//! [`Scanner`] reads from an [`io::Read`] source and produces, via
//! [`next`](Scanner::next), a stream of lexical tokens expressed as `&[u8]`
//! slices into its internal window. Tokens are returned verbatim: strings
//! keep their surrounding quotes and escape sequences, numbers keep their
//! sign/digits/exponent, structural tokens are a single byte. Whitespace
//! between tokens is skipped and never returned.

use std::io::{self, Read};

use crate::options::Options;
use crate::reader::ByteReader;

/// JSON insignificant whitespace: space, tab, carriage return, line feed.
const WHITESPACE: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\r' as usize] = true;
    table[b'\n' as usize] = true;
    table
};

/// Number sub-automaton states. The accepting states are `LeadingZero`,
/// `AnyDigit1`, `AnyDigit2` and `AnyDigit3`; every other state rejects at
/// end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumState {
    Begin,
    Sign,
    LeadingZero,
    AnyDigit1,
    Decimal,
    AnyDigit2,
    Exponent,
    ExpSign,
    AnyDigit3,
}

enum NumStep {
    Continue(NumState),
    /// Number complete, exclusive of the current byte.
    Accept,
    Reject,
}

fn num_step(state: NumState, c: u8) -> NumStep {
    use NumState::*;

    match state {
        Begin => match c {
            b'-' => NumStep::Continue(Sign),
            _ => num_step(Sign, c),
        },
        Sign => match c {
            b'0' => NumStep::Continue(LeadingZero),
            b'1'..=b'9' => NumStep::Continue(AnyDigit1),
            _ => NumStep::Reject,
        },
        AnyDigit1 => match c {
            b'0'..=b'9' => NumStep::Continue(AnyDigit1),
            _ => num_step(LeadingZero, c),
        },
        // Shared exit logic for the integer part. A digit after a leading
        // zero is deliberately not an error: `01` scans as `0` then `1`.
        LeadingZero => match c {
            b'.' => NumStep::Continue(Decimal),
            b'e' | b'E' => NumStep::Continue(Exponent),
            _ => NumStep::Accept,
        },
        Decimal => match c {
            b'0'..=b'9' => NumStep::Continue(AnyDigit2),
            _ => NumStep::Reject,
        },
        AnyDigit2 => match c {
            b'0'..=b'9' => NumStep::Continue(AnyDigit2),
            b'e' | b'E' => NumStep::Continue(Exponent),
            _ => NumStep::Accept,
        },
        Exponent => match c {
            b'+' | b'-' => NumStep::Continue(ExpSign),
            _ => num_step(ExpSign, c),
        },
        ExpSign => match c {
            b'0'..=b'9' => NumStep::Continue(AnyDigit3),
            _ => NumStep::Reject,
        },
        AnyDigit3 => match c {
            b'0'..=b'9' => NumStep::Continue(AnyDigit3),
            _ => NumStep::Accept,
        },
    }
}

fn num_complete(state: NumState) -> bool {
    matches!(
        state,
        NumState::LeadingZero | NumState::AnyDigit1 | NumState::AnyDigit2 | NumState::AnyDigit3
    )
}

/// A single-pass, zero-copy JSON scanner.
///
/// A valid token begins with one of the following:
///
/// ```text
/// {  object start         }  object end
/// [  array start          ]  array end
/// ,  literal comma        :  literal colon
/// t  JSON true            f  JSON false
/// n  JSON null            "  a string, possibly containing escapes
/// -, 0-9  a number
/// ```
///
/// A `Scanner` is single-stream and not meant for concurrent use; create one
/// scanner per input.
#[derive(Debug)]
pub struct Scanner<R> {
    br: ByteReader<R>,
    /// Length of the most recently returned token, released on the next
    /// call to `next`.
    pos: usize,
}

impl<R: Read> Scanner<R> {
    /// Creates a scanner over `src` with the default working buffer.
    pub fn new(src: R) -> Self {
        Self::with_options(src, Options::default())
    }

    /// Creates a scanner over `src`, sizing the working buffer per
    /// `options`.
    pub fn with_options(src: R, options: Options) -> Self {
        Self {
            br: ByteReader::with_capacity(src, options.initial_buffer_size),
            pos: 0,
        }
    }

    /// Returns the next lexical token as a slice into the scanner's window.
    ///
    /// The slice is valid until `next` is called again; the borrow checker
    /// enforces this. Returns `None` at end of input or on a malformed
    /// token; [`error`](Self::error) distinguishes a source failure from a
    /// clean end.
    #[allow(clippy::should_implement_trait)] // tokens borrow from self, not an Iterator
    pub fn next(&mut self) -> Option<&[u8]> {
        let len = self.scan()?;
        Some(&self.br.window()[..len])
    }

    /// Returns the sticky error of the underlying source, if any.
    pub fn error(&self) -> Option<&io::Error> {
        self.br.error()
    }

    /// The most recently scanned token. Only meaningful directly after a
    /// successful [`scan`](Self::scan).
    #[inline]
    pub(crate) fn token(&self) -> &[u8] {
        &self.br.window()[..self.pos]
    }

    /// Advances to the next token, leaving it at the head of the window and
    /// returning its length.
    pub(crate) fn scan(&mut self) -> Option<usize> {
        self.br.release(self.pos);
        self.pos = 0;
        loop {
            let start = self
                .br
                .window()
                .iter()
                .position(|&c| !WHITESPACE[c as usize]);
            match start {
                Some(start) => {
                    self.br.release(start);
                    let len = match self.br.window()[0] {
                        b'{' | b'}' | b'[' | b']' | b':' | b',' => 1,
                        b't' => self.scan_literal(b"true"),
                        b'f' => self.scan_literal(b"false"),
                        b'n' => self.scan_literal(b"null"),
                        b'"' => self.scan_string(),
                        _ => self.scan_number(),
                    };
                    if len == 0 {
                        // malformed token, or the source gave out mid-token
                        return None;
                    }
                    self.pos = len;
                    return Some(len);
                }
                None => {
                    // all whitespace, drop it and refill
                    let n = self.br.window().len();
                    self.br.release(n);
                    if self.br.extend() == 0 {
                        return None;
                    }
                }
            }
        }
    }

    /// Matches `expected` at the head of the window, refilling as needed.
    /// The byte following the literal is not examined: `truex` scans as
    /// `true` followed by whatever `x` turns out to be.
    fn scan_literal(&mut self, expected: &'static [u8]) -> usize {
        while self.br.window().len() < expected.len() {
            if self.br.extend() == 0 {
                return 0;
            }
        }
        if &self.br.window()[..expected.len()] == expected {
            expected.len()
        } else {
            0
        }
    }

    /// Returns the length of the string token at the head of the window,
    /// including both quotes, or 0 if the source ends before the closing
    /// quote. Escape sequences are passed through uninterpreted and the
    /// content is not validated as UTF-8.
    fn scan_string(&mut self) -> usize {
        let mut escaped = false;
        let mut offset = 1; // past the opening quote
        loop {
            let w = self.br.window();
            for &c in &w[offset..] {
                offset += 1;
                if escaped {
                    escaped = false;
                } else if c == b'\\' {
                    escaped = true;
                } else if c == b'"' {
                    return offset;
                }
            }
            if self.br.extend() == 0 {
                return 0;
            }
        }
    }

    /// Returns the length of the number token at the head of the window, or
    /// 0 if it is malformed or cut short by end of input.
    fn scan_number(&mut self) -> usize {
        let mut state = NumState::Begin;
        let mut offset = 0;
        loop {
            let w = self.br.window();
            for &c in &w[offset..] {
                match num_step(state, c) {
                    NumStep::Continue(next) => {
                        state = next;
                        offset += 1;
                    }
                    NumStep::Accept => return offset,
                    NumStep::Reject => return 0,
                }
            }
            if self.br.extend() == 0 {
                // End of input ends the number, provided the automaton is in
                // an accepting state.
                return if num_complete(state) { offset } else { 0 };
            }
        }
    }
}
