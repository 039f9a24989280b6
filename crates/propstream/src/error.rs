use thiserror::Error;

/// A malformed backslash escape encountered while decoding a key or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A `\u` escape ended before four hexadecimal digits were seen.
    #[error("truncated \\u escape: expected 4 hex digits")]
    TruncatedUnicodeEscape,
    /// A `\u` escape contained a character that is not a hexadecimal digit.
    #[error("invalid character '{0}' in \\u escape")]
    InvalidUnicodeEscapeChar(char),
    /// A `\u` escape produced a UTF-16 surrogate half with no matching
    /// partner escape adjacent to it.
    #[error("unpaired surrogate \\u{0:04X} escape")]
    UnpairedSurrogate(u16),
}

/// Errors surfaced by parsing and loading property text.
#[derive(Debug, Error)]
pub enum Error {
    /// A key or value contained a malformed escape sequence. Fatal for the
    /// decode call and for an in-progress load.
    #[error("malformed escape: {0}")]
    Escape(#[from] EscapeError),
    /// The underlying character source failed to produce input.
    #[cfg(feature = "std")]
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
