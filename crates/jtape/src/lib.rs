// SPDX-License-Identifier: MIT OR Apache-2.0
//! jtape: a high-throughput JSON parser built on a two-stage, simdjson-style
//! pipeline and a zero-copy tape representation.
//!
//! ```
//! let parsed = jtape::parse(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
//! let b = parsed.iter().find_key("b").unwrap();
//! assert_eq!(b.array().unwrap().nth(2).unwrap().as_str(), Some("x"));
//! ```
//!
//! A single parse call runs Stage 1 (`jtape_simd`, a SIMD-within-a-register
//! structural/whitespace classifier over 64-byte windows) to completion,
//! materializing the structural-index stream, then feeds it to Stage 2
//! (`jtape_tape`, a pushdown automaton) to build the tape. There is no
//! threading or channel handoff between the stages within a single parse.
//!
//! This crate is a thin facade: [`ParsedJson`] and its traversal API live in
//! `jtape-tape`, re-exported here as the single public surface.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

pub use jtape_core::ParseError;
pub use jtape_tape::{
    padding_for, parse_padded, ArrayIter, ObjectIter, ParserConfig, ParsedJson, PathSegment, Type,
    ValueIter, Workspace,
};

/// Parse a single JSON document with default options
/// ([`ParserConfig::default`]).
///
/// # Errors
///
/// Returns [`ParseError`] on empty/whitespace-only input or any grammar,
/// encoding, or depth violation described in `jtape`'s error taxonomy.
pub fn parse(input: &[u8]) -> Result<ParsedJson, ParseError> {
    jtape_tape::parse(input, &ParserConfig::default())
}

/// Parse a single JSON document with explicit options, optionally reusing
/// a previous [`ParsedJson`]'s buffers.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with(
    input: &[u8],
    config: &ParserConfig,
    reuse: Option<ParsedJson>,
) -> Result<ParsedJson, ParseError> {
    jtape_tape::parse_with(input, config, reuse)
}

/// Parse newline-delimited JSON with default options: one document per
/// line, any of `\n`/`\r\n`/bare `\r` accepted as a separator, blank lines
/// skipped. An error on any line aborts the whole parse.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_nd(input: &[u8]) -> Result<ParsedJson, ParseError> {
    jtape_tape::parse_nd(input, &ParserConfig::default())
}

/// Parse newline-delimited JSON with explicit options, optionally reusing
/// a previous [`ParsedJson`]'s buffers.
///
/// # Errors
///
/// Same as [`parse_nd`].
pub fn parse_nd_with(
    input: &[u8],
    config: &ParserConfig,
    reuse: Option<ParsedJson>,
) -> Result<ParsedJson, ParseError> {
    jtape_tape::parse_nd_with(input, config, reuse)
}
