//! A pull-based streaming JSON reader.
//!
//! `jsonpull` tokenizes JSON from any [`std::io::Read`] source without
//! materializing the input: tokens are zero-copy byte slices into an
//! internal sliding window, valid until the next call. Two layers are
//! provided:
//!
//! - [`Scanner`] yields every lexical token, structural punctuation
//!   included, exactly as it appears in the input.
//! - [`Decoder`] validates the JSON grammar on top of the scanner, elides
//!   colons and commas, and can bind whole values into [`Value`].
//!
//! ```
//! use jsonpull::Decoder;
//!
//! let mut decoder = Decoder::new(&b"{\"a\": 1, \"b\": [true, null]}"[..]);
//! let mut tokens = Vec::new();
//! while let Some(tok) = decoder.next_token()? {
//!     tokens.push(String::from_utf8(tok.to_vec())?);
//! }
//! assert_eq!(
//!     tokens,
//!     ["{", "\"a\"", "1", "\"b\"", "[", "true", "null", "]", "}"]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decoder;
mod error;
mod options;
mod reader;
mod scanner;
mod stack;
mod value;

pub use decoder::{Decoder, Token};
pub use error::{Error, SyntaxError};
pub use options::Options;
pub use scanner::Scanner;
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
