//! The owned parse result and its entry points (`spec.md` §3 "ParsedJson",
//! §6 "External interfaces").
//!
//! `ParsedJson` owns everything a [`crate::iter::ValueIter`] borrows from:
//! the tape, the string buffer, and the padded copy of the input that
//! zero-copy-aliased strings point into. It never exposes a partially built
//! value -- `parse`/`parse_with`/`parse_nd`/`parse_padded` return either a
//! complete `ParsedJson` or an error, never both.

use jtape_core::{ParseError, Result, WINDOW};

use crate::config::ParserConfig;
use crate::iter::ValueIter;
use crate::ndjson;
use crate::stringbuf::StringBuffer;
use crate::tape::{self, StringLocation, Tape};
use crate::workspace::Workspace;

/// The result of a successful parse: an owned tape, its string buffer, and
/// the padded input buffer that aliased (zero-copy) strings borrow from.
#[derive(Debug, Clone, Default)]
pub struct ParsedJson {
    workspace: Workspace,
    logical_len: usize,
    is_ndjson: bool,
}

/// Bytes of trailing padding `padding_for(len)` must append after `len`
/// logical bytes so Stage 1 can always read a full window without a bounds
/// check, per `SPEC_FULL.md` §3.1.
#[must_use]
pub fn padding_for(len: usize) -> usize {
    let rounded = len.div_ceil(WINDOW) * WINDOW;
    rounded + WINDOW - len
}

pub(crate) fn pad_buffer(input: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(input.len() + padding_for(input.len()));
    buf.extend_from_slice(input);
    buf.resize(input.len() + padding_for(input.len()), 0);
    buf
}

/// Parse a single JSON document from `input` with default options.
///
/// # Errors
///
/// See [`crate::config::ParserConfig`] and `spec.md` §7 for the full error
/// taxonomy; this fails on empty/whitespace-only input, malformed grammar,
/// or nesting beyond the configured maximum depth.
pub fn parse(input: &[u8], config: &ParserConfig) -> Result<ParsedJson> {
    parse_with(input, config, None)
}

/// Parse a single JSON document, reusing `reuse`'s buffers if provided.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with(
    input: &[u8],
    config: &ParserConfig,
    reuse: Option<ParsedJson>,
) -> Result<ParsedJson> {
    let mut workspace = reuse.map_or_else(Workspace::new, ParsedJson::into_workspace);
    workspace.clear();

    workspace.padded_input.extend_from_slice(input);
    workspace
        .padded_input
        .resize(input.len() + padding_for(input.len()), 0);

    workspace.structural_scratch =
        jtape_simd::build_structural_index(&workspace.padded_input, input.len())?;

    crate::builder::build(
        input,
        &workspace.structural_scratch,
        config,
        &mut workspace.tape,
        &mut workspace.strings,
    )?;

    Ok(ParsedJson {
        workspace,
        logical_len: input.len(),
        is_ndjson: false,
    })
}

/// Parse newline-delimited JSON: one document per line, `\n`/`\r\n`/bare
/// `\r` all accepted as separators and blank lines skipped (`SPEC_FULL.md`
/// §9(c)). An error on any line aborts the whole parse.
///
/// # Errors
///
/// Same as [`parse`], reported against the offending line's own offsets.
pub fn parse_nd(input: &[u8], config: &ParserConfig) -> Result<ParsedJson> {
    parse_nd_with(input, config, None)
}

/// Parse newline-delimited JSON, reusing `reuse`'s buffers if provided.
///
/// # Errors
///
/// Same as [`parse_nd`].
pub fn parse_nd_with(
    input: &[u8],
    config: &ParserConfig,
    reuse: Option<ParsedJson>,
) -> Result<ParsedJson> {
    let mut workspace = reuse.map_or_else(Workspace::new, ParsedJson::into_workspace);
    workspace.clear();

    ndjson::build(input, config, &mut workspace.tape, &mut workspace.strings)?;

    Ok(ParsedJson {
        workspace,
        logical_len: input.len(),
        is_ndjson: true,
    })
}

/// Parse a single document from a buffer the caller has already padded
/// (e.g. via [`padding_for`]), taking ownership of it directly instead of
/// copying -- the zero-copy entry point `SPEC_FULL.md` §3.1 names.
///
/// # Errors
///
/// Same as [`parse`], plus [`ParseError::InsufficientPadding`] if
/// `padded_input` does not carry at least [`padding_for`]`(logical_len)`
/// trailing bytes.
pub fn parse_padded(
    padded_input: Vec<u8>,
    logical_len: usize,
    config: &ParserConfig,
) -> Result<ParsedJson> {
    let needed = padding_for(logical_len);
    if padded_input.len() < logical_len + needed {
        return Err(ParseError::InsufficientPadding { needed });
    }

    let mut workspace = Workspace::new();
    workspace.structural_scratch =
        jtape_simd::build_structural_index(&padded_input, logical_len)?;
    crate::builder::build(
        &padded_input[..logical_len],
        &workspace.structural_scratch,
        config,
        &mut workspace.tape,
        &mut workspace.strings,
    )?;
    workspace.padded_input = padded_input;

    Ok(ParsedJson {
        workspace,
        logical_len,
        is_ndjson: false,
    })
}

impl ParsedJson {
    /// A cursor onto the single root document's value.
    ///
    /// For an NDJSON result, this is the first line's value; use
    /// [`ParsedJson::documents`] to walk all of them.
    #[must_use]
    pub fn iter(&self) -> ValueIter<'_> {
        ValueIter::new(self, 1)
    }

    /// Walk every document on the tape in source order. For a
    /// single-document parse this yields exactly one value.
    pub fn documents(&self) -> impl Iterator<Item = ValueIter<'_>> + '_ {
        (0..self.workspace.tape.len()).filter_map(move |i| {
            let entry = self.workspace.tape.get(i);
            if tape::tag_of(entry) == tape::TAG_ROOT && tape::payload_of(entry) as usize > i {
                Some(ValueIter::new(self, i + 1))
            } else {
                None
            }
        })
    }

    /// Whether this result came from [`parse_nd`]/[`parse_nd_with`].
    #[must_use]
    pub const fn is_ndjson(&self) -> bool {
        self.is_ndjson
    }

    /// Length, in bytes, of the original (unpadded) input that was parsed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.logical_len
    }

    /// Whether the original input was empty. Always `false`: `parse` never
    /// succeeds on empty input (see [`jtape_core::ParseError::EmptyInput`]).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.logical_len == 0
    }

    pub(crate) fn tape(&self) -> &Tape {
        &self.workspace.tape
    }

    pub(crate) fn tape_mut(&mut self) -> &mut Tape {
        &mut self.workspace.tape
    }

    pub(crate) fn strings_mut(&mut self) -> &mut StringBuffer {
        &mut self.workspace.strings
    }

    /// Resolve a string tape payload to its content bytes, regardless of
    /// whether it is buffered or aliased to the input.
    pub(crate) fn read_string(&self, location: StringLocation) -> &[u8] {
        match location {
            StringLocation::Buffered(offset) => self.workspace.strings.read(offset),
            StringLocation::AliasedInput(offset) => {
                let start = offset as usize;
                let end = start
                    + memchr::memchr(b'"', &self.workspace.padded_input[start..])
                        .expect("aliased string content is always followed by a closing quote");
                &self.workspace.padded_input[start..end]
            }
        }
    }

    fn into_workspace(mut self) -> Workspace {
        self.workspace.clear();
        self.workspace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_for_covers_a_full_extra_window() {
        assert_eq!(padding_for(0), WINDOW);
        assert_eq!(padding_for(1), WINDOW + (WINDOW - 1));
        assert_eq!(padding_for(WINDOW), WINDOW);
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = parse(b"   ", &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::EmptyInput));
    }

    #[test]
    fn parse_then_reuse_clears_prior_state() {
        let first = parse(br#"{"a":1}"#, &ParserConfig::default()).unwrap();
        let second = parse_with(br#"[1,2,3]"#, &ParserConfig::default(), Some(first)).unwrap();
        assert_eq!(second.iter().array().unwrap().count(), 3);
    }

    #[test]
    fn parse_padded_rejects_insufficient_padding() {
        let input = br#"{"a":1}"#;
        let err = parse_padded(input.to_vec(), input.len(), &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::InsufficientPadding { .. }));
    }

    #[test]
    fn parse_padded_accepts_preallocated_buffer() {
        let input: &[u8] = br#"{"a":1}"#;
        let mut buf = input.to_vec();
        buf.resize(input.len() + padding_for(input.len()), 0);
        let pj = parse_padded(buf, input.len(), &ParserConfig::default()).unwrap();
        assert_eq!(pj.iter().find_key("a").unwrap().as_int(), Some(1));
    }

    #[test]
    fn ndjson_walks_each_line_as_a_document() {
        let input = b"{\"a\":1}\n{\"a\":2}\n\n{\"a\":3}\r\n";
        let pj = parse_nd(input, &ParserConfig::default()).unwrap();
        assert!(pj.is_ndjson());
        let values: Vec<_> = pj
            .documents()
            .map(|d| d.find_key("a").unwrap().as_int().unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn ndjson_aborts_on_first_bad_line() {
        let input = b"{\"a\":1}\nnot json\n{\"a\":3}\n";
        let err = parse_nd(input, &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedByte { .. }));
    }
}
