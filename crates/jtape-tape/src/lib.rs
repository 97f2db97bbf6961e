// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stage 2 tape builder, tape model, and NDJSON driver.
//!
//! This crate turns the structural-index stream `jtape-simd` produces into
//! a [`tape::Tape`] plus a [`stringbuf::StringBuffer`], and provides the
//! traversal/lookup API ([`iter`]) and owning result type ([`parsed`]) over
//! it. [`ndjson`] layers a one-document-per-line driver on top of the same
//! single-document pipeline.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Stage 2 pushdown automaton: structural-index stream to tape.
pub mod builder;
/// Parser options (`CopyStrings`, `MaxDepth`).
pub mod config;
/// Tape traversal, lookup, typed accessors, setters, and re-serialization.
pub mod iter;
/// NDJSON (one document per line) driver.
pub mod ndjson;
/// JSON number grammar scanning and conversion.
pub mod number;
/// The owned parse result and its entry points.
pub mod parsed;
/// The string buffer: length-prefixed unescaped UTF-8 content.
pub mod stringbuf;
/// The tape: a flat, append-only sequence of tagged 64-bit entries.
pub mod tape;
/// String literal unescaping.
pub mod unescape;
/// Reusable buffers threaded through repeated parse calls.
pub mod workspace;

pub use config::ParserConfig;
pub use iter::{ArrayIter, ObjectIter, PathSegment, Type, ValueIter};
pub use parsed::{padding_for, parse, parse_nd, parse_nd_with, parse_padded, parse_with, ParsedJson};
pub use tape::{StringLocation, Tape};
pub use workspace::Workspace;
