//! The JSON grammar recognizer.
//!
//! [`Decoder`] layers a pushdown automaton over [`Scanner`]: it checks that
//! objects and arrays are balanced and properly punctuated, consumes colons
//! and commas, and hands every other token through. On top of the raw token
//! stream it offers a typed per-token view ([`token`](Decoder::token)) and a
//! whole-value dynamic binding ([`decode`](Decoder::decode)).

use std::io::{self, Read};
use std::str;

use crate::error::{Error, SyntaxError};
use crate::options::Options;
use crate::scanner::Scanner;
use crate::stack::BitStack;
use crate::value::{Array, Map, Value};

/// Decoder states. Each state accepts one scanner token and either emits
/// it, elides it, or reports a [`SyntaxError`] naming the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Before the top-level value.
    Value,
    /// Inside an object, expecting a key or `}`.
    ObjectKey,
    /// After a key, expecting `:`.
    ObjectColon,
    /// After a colon, expecting a value.
    ObjectValue,
    /// After a member value, expecting `,` or `}`.
    ObjectComma,
    /// Inside an array, expecting a value or `]`.
    ArrayValue,
    /// After an element, expecting `,` or `]`.
    ArrayComma,
    /// The top-level value is complete.
    End,
}

/// Outcome of feeding one scanner token to the state machine.
enum Step {
    /// Return the token to the caller.
    Emit,
    /// Token consumed silently (`:` and `,`), scan again.
    Elide,
    Fail(SyntaxError),
}

/// A typed semantic token, as produced by [`Decoder::token`].
///
/// String bodies are quote-stripped but escape sequences are *not*
/// processed: the input `"\n"` yields the two-character `Str` `\n`. Numbers
/// are bound as 64-bit floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Bool(bool),
    Null,
    Str(&'a str),
    Number(f64),
}

/// A streaming JSON decoder.
///
/// `Decoder` guarantees that the delimiters `[ ] { }` it returns are
/// properly nested and matched; an unexpected delimiter or separator in the
/// input surfaces as an error. Commas and colons are elided.
///
/// A decoder reads exactly one top-level value. Once that value is complete
/// the decoder reports end-of-stream and leaves any trailing bytes
/// unexamined.
#[derive(Debug)]
pub struct Decoder<R> {
    scanner: Scanner<R>,
    state: DecodeState,
    stack: BitStack,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder over `src` with the default working buffer.
    pub fn new(src: R) -> Self {
        Self::with_options(src, Options::default())
    }

    /// Creates a decoder over `src`, sizing the working buffer per
    /// `options`.
    pub fn with_options(src: R, options: Options) -> Self {
        Self {
            scanner: Scanner::with_options(src, options),
            state: DecodeState::Value,
            stack: BitStack::default(),
        }
    }

    /// Returns the next semantic token as a slice into the decoder's
    /// window, or `Ok(None)` once the top-level value has been fully
    /// consumed.
    ///
    /// The slice is valid until the decoder is used again. A valid token
    /// begins with one of `{ } [ ] t f n "` or a sign/digit; colons and
    /// commas never appear.
    pub fn next_token(&mut self) -> Result<Option<&[u8]>, Error> {
        loop {
            if self.state == DecodeState::End {
                return Ok(None);
            }
            if self.scanner.scan().is_none() {
                return Err(self.stream_error());
            }
            let first = self.scanner.token()[0];

            use DecodeState as S;
            let step = match (self.state, first) {
                (S::End, _) => return Ok(None),

                (S::Value, b'{') => self.open(true, S::ObjectKey),
                (S::Value, b'[') => self.open(false, S::ArrayValue),
                (S::Value, b',') => Step::Fail(SyntaxError::UnexpectedComma),
                (S::Value, _) => {
                    self.state = S::End;
                    Step::Emit
                }

                (S::ObjectKey, b'}') => self.close(),
                (S::ObjectKey, b'"') => {
                    self.state = S::ObjectColon;
                    Step::Emit
                }
                (S::ObjectKey, _) => Step::Fail(SyntaxError::ExpectedObjectKey),

                (S::ObjectColon, b':') => {
                    self.state = S::ObjectValue;
                    Step::Elide
                }
                (S::ObjectColon, _) => Step::Fail(SyntaxError::ExpectedColon),

                (S::ObjectValue, b'{') => self.open(true, S::ObjectKey),
                (S::ObjectValue, b'[') => self.open(false, S::ArrayValue),
                (S::ObjectValue, _) => {
                    self.state = S::ObjectComma;
                    Step::Emit
                }

                (S::ObjectComma, b'}') => self.close(),
                (S::ObjectComma, b',') => {
                    self.state = S::ObjectKey;
                    Step::Elide
                }
                (S::ObjectComma, _) => Step::Fail(SyntaxError::ExpectedObjectComma),

                (S::ArrayValue, b'{') => self.open(true, S::ObjectKey),
                (S::ArrayValue, b'[') => self.open(false, S::ArrayValue),
                (S::ArrayValue, b']') => self.close(),
                (S::ArrayValue, b',') => Step::Fail(SyntaxError::UnexpectedComma),
                (S::ArrayValue, _) => {
                    self.state = S::ArrayComma;
                    Step::Emit
                }

                (S::ArrayComma, b']') => self.close(),
                (S::ArrayComma, b',') => {
                    self.state = S::ArrayValue;
                    Step::Elide
                }
                (S::ArrayComma, _) => Step::Fail(SyntaxError::ExpectedArrayComma),
            };

            match step {
                Step::Emit => return Ok(Some(self.scanner.token())),
                Step::Elide => continue,
                Step::Fail(err) => return Err(err.into()),
            }
        }
    }

    /// Returns the next semantic token in typed form, or `Ok(None)` at the
    /// end of the stream.
    ///
    /// This adapter allocates nothing but does validate string bodies as
    /// UTF-8 and parse numbers; see [`next_token`](Self::next_token) for the
    /// raw view.
    pub fn token(&mut self) -> Result<Option<Token<'_>>, Error> {
        let Some(tok) = self.next_token()? else {
            return Ok(None);
        };
        let token = match tok[0] {
            b'{' => Token::ObjectStart,
            b'}' => Token::ObjectEnd,
            b'[' => Token::ArrayStart,
            b']' => Token::ArrayEnd,
            b't' => Token::Bool(true),
            b'f' => Token::Bool(false),
            b'n' => Token::Null,
            b'"' => Token::Str(string_body(tok)?),
            _ => Token::Number(parse_number(tok)?),
        };
        Ok(Some(token))
    }

    /// Reads the next complete JSON value from the stream and binds it into
    /// a [`Value`].
    ///
    /// Objects become string-keyed maps, arrays become vectors, numbers
    /// bind as `f64`. String bodies keep their escape sequences verbatim.
    pub fn decode(&mut self) -> Result<Value, Error> {
        match self.next_element()? {
            Element::Begin(true) => self.decode_object(),
            Element::Begin(false) => self.decode_array(),
            Element::Scalar(value) => Ok(value),
            Element::Close(c) => Err(Error::UnexpectedToken(c as char)),
        }
    }

    fn decode_object(&mut self) -> Result<Value, Error> {
        let mut map = Map::new();
        loop {
            // ObjectKey state guarantees the token is a string or `}`.
            let key = {
                let Some(tok) = self.next_token()? else {
                    return Err(Error::UnexpectedEof);
                };
                if tok[0] == b'}' {
                    break;
                }
                string_body(tok)?.to_owned()
            };
            let value = self.decode()?;
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    fn decode_array(&mut self) -> Result<Value, Error> {
        let mut items = Array::new();
        loop {
            match self.next_element()? {
                Element::Begin(true) => items.push(self.decode_object()?),
                Element::Begin(false) => items.push(self.decode_array()?),
                Element::Scalar(value) => items.push(value),
                Element::Close(b']') => return Ok(Value::Array(items)),
                Element::Close(c) => return Err(Error::UnexpectedToken(c as char)),
            }
        }
    }

    fn next_element(&mut self) -> Result<Element, Error> {
        let Some(tok) = self.next_token()? else {
            return Err(Error::UnexpectedEof);
        };
        Ok(match tok[0] {
            b'{' => Element::Begin(true),
            b'[' => Element::Begin(false),
            b'}' | b']' => Element::Close(tok[0]),
            b't' => Element::Scalar(Value::Boolean(true)),
            b'f' => Element::Scalar(Value::Boolean(false)),
            b'n' => Element::Scalar(Value::Null),
            b'"' => Element::Scalar(Value::String(string_body(tok)?.to_owned())),
            _ => Element::Scalar(Value::Number(parse_number(tok)?)),
        })
    }

    fn open(&mut self, object: bool, next: DecodeState) -> Step {
        self.stack.push(object);
        self.state = next;
        Step::Emit
    }

    fn close(&mut self) -> Step {
        self.stack.pop();
        self.state = match self.stack.top() {
            None => DecodeState::End,
            Some(true) => DecodeState::ObjectComma,
            Some(false) => DecodeState::ArrayComma,
        };
        Step::Emit
    }

    /// Error for an empty scanner token: a source failure if one is stored,
    /// otherwise truncated or malformed input.
    fn stream_error(&self) -> Error {
        match self.scanner.error() {
            Some(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            None => Error::UnexpectedEof,
        }
    }
}

/// One step of the decode layer: a container boundary or a bound scalar.
enum Element {
    /// `{` (true) or `[` (false).
    Begin(bool),
    /// `}` or `]`.
    Close(u8),
    Scalar(Value),
}

/// Strips the surrounding quotes from a string token without processing
/// escapes, validating the body as UTF-8.
fn string_body(tok: &[u8]) -> Result<&str, Error> {
    let body = &tok[1..tok.len() - 1];
    str::from_utf8(body).map_err(|_| Error::InvalidUtf8)
}

fn parse_number(tok: &[u8]) -> Result<f64, Error> {
    let text = str::from_utf8(tok).map_err(|_| Error::InvalidUtf8)?;
    // Overflow to infinity is out of range, like any other parse failure.
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::InvalidNumber(text.to_owned())),
    }
}
