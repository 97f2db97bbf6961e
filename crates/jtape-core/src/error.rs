//! Parse error taxonomy.
//!
//! `jtape` fails fast: any lexical, grammatical, or resource error aborts the
//! whole parse and discards partial output (see `ParsedJson`'s construction
//! contract). A single [`ParseError`] value carries a short reason and the
//! byte offset where it was detected.

use thiserror::Error;

/// Result alias used throughout `jtape`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A single non-recoverable parse failure.
///
/// Every variant carries the byte offset into the original input where the
/// problem was detected, except [`ParseError::EmptyInput`] which has none.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A byte appeared where the grammar did not allow it.
    #[error("unexpected byte {byte:#04x} at offset {offset}")]
    UnexpectedByte {
        /// Byte offset of the offending byte.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },

    /// A string literal was not closed before end of input.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A `\` was followed by a character that is not a valid JSON escape.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape {
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// A `\u` escape was not followed by four hex digits.
    #[error("invalid unicode escape at offset {offset}")]
    InvalidUnicodeEscape {
        /// Byte offset of the backslash.
        offset: usize,
    },

    /// A UTF-16 surrogate half appeared without its matching pair.
    #[error("lone UTF-16 surrogate in string escape at offset {offset}")]
    LoneSurrogate {
        /// Byte offset of the backslash that introduced the surrogate.
        offset: usize,
    },

    /// A raw control byte (< 0x20) appeared inside a string literal.
    #[error("unescaped control character in string at offset {offset}")]
    ControlCharacterInString {
        /// Byte offset of the control byte.
        offset: usize,
    },

    /// A number's magnitude could not be represented, even as `f64`.
    #[error("number overflow at offset {offset}")]
    NumberOverflow {
        /// Byte offset where the number token started.
        offset: usize,
    },

    /// A number token did not match JSON number grammar.
    #[error("invalid number at offset {offset}")]
    InvalidNumber {
        /// Byte offset where the number token started.
        offset: usize,
    },

    /// Input ended while one or more containers were still open.
    #[error("truncated document: unclosed container at offset {offset}")]
    TruncatedDocument {
        /// Byte offset of the end of input.
        offset: usize,
    },

    /// Container nesting exceeded the configured maximum depth.
    #[error("nesting depth exceeds configured maximum {max_depth} at offset {offset}")]
    DepthExceeded {
        /// Byte offset of the container open that crossed the limit.
        offset: usize,
        /// The configured maximum.
        max_depth: usize,
    },

    /// Non-whitespace bytes followed a complete top-level document.
    #[error("trailing garbage after complete document at offset {offset}")]
    TrailingGarbage {
        /// Byte offset of the first trailing byte.
        offset: usize,
    },

    /// The input contained no document (empty, or whitespace only).
    #[error("empty input")]
    EmptyInput,

    /// A string's unescaped content was not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte.
        offset: usize,
    },

    /// A caller-supplied padded buffer did not carry enough trailing padding.
    #[error("input buffer is missing required trailing padding (need {needed} bytes)")]
    InsufficientPadding {
        /// Padding bytes required by `padding_for`.
        needed: usize,
    },

    /// An in-place setter targeted a tape entry whose tag did not match.
    #[error("tag mismatch: cannot apply setter at tape index {index}")]
    TagMismatch {
        /// Tape index the setter targeted.
        index: usize,
    },
}
