//! NDJSON driver: one JSON document per line (`spec.md` §2 "NDJSON Driver",
//! resolved Open Question (c) in `SPEC_FULL.md` §9).
//!
//! Rather than threading a newline-as-document-boundary signal into Stage
//! 1's cross-window carry state, each line is re-run through the full
//! single-document Stage1 -> Stage2 pipeline independently, appending its
//! ROOT-open/value/ROOT-close triple onto the shared tape and string buffer.
//! This trades a small amount of redundant padding/allocation per line for
//! a Stage 1 that never needs to know about line boundaries at all.
//!
//! Each line is padded into its own throwaway buffer (see `build` below),
//! not kept anywhere `ParsedJson` retains past this call. `copy_strings:
//! false`'s input-aliasing optimization needs exactly the opposite: a
//! buffer the result can still read from afterward. So NDJSON parsing
//! always copies string values into the string buffer regardless of what
//! `config.copy_strings` says -- there is no per-line input buffer for an
//! aliased offset to point into once this function returns.

use jtape_core::{ParseError, Result};

use crate::config::ParserConfig;
use crate::stringbuf::StringBuffer;
use crate::tape::Tape;

/// Parse `input` as newline-delimited JSON, appending one document per
/// non-blank line onto `tape`/`strings` in source order.
///
/// `\n`, `\r\n`, and a bare `\r` are all accepted as line separators; lines
/// that are empty or contain only whitespace are skipped.
///
/// # Errors
///
/// [`ParseError::EmptyInput`] if every line is blank (including a fully
/// empty input). Otherwise, the first line that fails to parse aborts the
/// whole call with that line's own error.
pub fn build(
    input: &[u8],
    config: &ParserConfig,
    tape: &mut Tape,
    strings: &mut StringBuffer,
) -> Result<()> {
    let line_config = config.with_copy_strings(true);
    let mut any_line = false;
    for (start, end) in split_lines(input) {
        any_line = true;
        let line = &input[start..end];
        let padded = crate::parsed::pad_buffer(line);
        let offsets = jtape_simd::build_structural_index(&padded, line.len())?;
        crate::builder::build(line, &offsets, &line_config, tape, strings)?;
    }
    if !any_line {
        return Err(ParseError::EmptyInput);
    }
    Ok(())
}

/// Split `input` into non-blank `(start, end)` byte spans, one per logical
/// line, with separators excluded from each span.
fn split_lines(input: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < input.len() {
        match input[i] {
            b'\n' => {
                spans.push((start, i));
                i += 1;
                start = i;
            }
            b'\r' => {
                spans.push((start, i));
                i += 1;
                if input.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    spans.push((start, input.len()));

    spans
        .into_iter()
        .filter(|&(s, e)| input[s..e].iter().any(|b| !b.is_ascii_whitespace()))
        .collect()
}
