use thiserror::Error;

/// Errors produced while decoding a JSON stream.
///
/// All of these are terminal for the stream: after an error the decoder's
/// state is undefined and it should be abandoned. Tokens returned before the
/// error remain valid output.
#[derive(Debug, Error)]
pub enum Error {
    /// The scanner produced an empty token mid-value: the input was
    /// truncated, or a lexeme was malformed (unterminated string, bad
    /// number, misspelled literal).
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The token stream violated the JSON grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A token appeared in a position the decode layer cannot bind.
    #[error("decode: unexpected token '{0}'")]
    UnexpectedToken(char),

    /// A string token's body is not valid UTF-8. Only the typed adapters
    /// validate; the raw token stream passes string bytes through verbatim.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// A number token failed to bind as a 64-bit float.
    #[error("cannot parse {0:?} as a number")]
    InvalidNumber(String),

    /// The underlying source failed. Clean end-of-stream is not an error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A JSON grammar violation, naming the decoder state that rejected the
/// token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("object key: expected string or '}}'")]
    ExpectedObjectKey,
    #[error("object colon: expected ':'")]
    ExpectedColon,
    #[error("object comma: expected ',' or '}}'")]
    ExpectedObjectComma,
    #[error("array comma: expected ',' or ']'")]
    ExpectedArrayComma,
    #[error("value: unexpected ','")]
    UnexpectedComma,
}
