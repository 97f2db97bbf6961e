//! Stage 1 entry point: scan a padded input buffer and emit the
//! structural-index stream (`spec.md` §4.1, step 9, and the Stage 1
//! contract).

use jtape_core::{ParseError, Result, WINDOW};

use crate::classify::classify_window;
use crate::strings::StringState;

/// Scan `buffer` (which must carry at least one full trailing window of
/// padding past `logical_len`, per the `padding_for` contract) and produce
/// the ascending structural-index stream: absolute byte offsets, strictly
/// within `[0, logical_len)`, of every structural character, every opening
/// quote of a string, and every scalar-token start.
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedString`] if the input ends while still
/// inside an open string literal.
pub fn build_structural_index(buffer: &[u8], logical_len: usize) -> Result<Vec<u32>> {
    debug_assert!(buffer.len() >= logical_len);
    let mut offsets = Vec::with_capacity(logical_len / 8 + 16);
    let mut state = StringState::default();
    let mut prev_byte_was_boundary = true; // start-of-input counts as a boundary
    let mut last_open_quote_offset: Option<usize> = None;

    let mut base = 0usize;
    while base < logical_len {
        let window_len = WINDOW.min(buffer.len() - base);
        let window = &buffer[base..base + window_len];
        let masks = classify_window(window);
        let string_masks = state.advance(masks.quote, masks.backslash);

        let structurals_outside_strings = masks.structural & !string_masks.in_string;
        let mut candidates = structurals_outside_strings | string_masks.opening_quote;

        // Step 7: scalar token starts -- a non-whitespace, non-structural
        // byte outside strings whose preceding byte is whitespace or
        // structural (or this is the very start of input).
        for i in 0..window_len {
            let bit = 1u64 << i;
            if masks.structural & bit != 0 || masks.whitespace & bit != 0 {
                prev_byte_was_boundary = true;
                continue;
            }
            if string_masks.in_string & bit != 0 {
                prev_byte_was_boundary = false;
                continue;
            }
            if prev_byte_was_boundary {
                candidates |= bit;
            }
            prev_byte_was_boundary = false;
        }

        let mut bits = candidates;
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            let offset = base + i;
            if offset < logical_len {
                offsets.push(offset as u32);
            }
            bits &= bits - 1;
        }

        if string_masks.opening_quote != 0 {
            let highest = 63 - string_masks.opening_quote.leading_zeros() as usize;
            last_open_quote_offset = Some(base + highest);
        }

        base += window_len;
    }

    if state.is_inside_string() {
        return Err(ParseError::UnterminatedString {
            offset: last_open_quote_offset.unwrap_or(0),
        });
    }

    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtape_core::limits::WINDOW as W;

    fn padded(input: &[u8]) -> Vec<u8> {
        let mut v = input.to_vec();
        v.resize(input.len() + W, 0);
        v
    }

    #[test]
    fn simple_object() {
        let input = br#"{"a":1}"#;
        let buf = padded(input);
        let offsets = build_structural_index(&buf, input.len()).unwrap();
        assert!(offsets.contains(&0)); // {
        assert!(offsets.contains(&1)); // opening quote of "a"
        assert!(offsets.contains(&4)); // :
        assert!(offsets.contains(&5)); // scalar start of 1
        assert!(offsets.contains(&6)); // }
    }

    #[test]
    fn unterminated_string_errors() {
        let input = br#"{"a"#;
        let buf = padded(input);
        let err = build_structural_index(&buf, input.len()).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }

    #[test]
    fn no_offset_emitted_past_logical_len() {
        let input = b"42";
        let buf = padded(input);
        let offsets = build_structural_index(&buf, input.len()).unwrap();
        assert_eq!(offsets, vec![0]);
    }

    #[test]
    fn string_content_not_indexed() {
        let input = br#""hello world""#;
        let buf = padded(input);
        let offsets = build_structural_index(&buf, input.len()).unwrap();
        assert_eq!(offsets, vec![0]); // only the opening quote
    }

    #[test]
    fn backslash_run_crossing_window_boundary() {
        // A string whose content ends with an even number of backslashes
        // immediately before the window boundary, followed by the closing
        // quote in the next window: the quote must NOT be treated as
        // escaped.
        let mut input = vec![b'"'];
        input.extend(std::iter::repeat(b'\\').take(62)); // 62 backslashes, even
        input.push(b'"'); // closes the string right at window end (index 63)
        input.push(b','); // forces a second window read
        let buf = padded(&input);
        let offsets = build_structural_index(&buf, input.len()).unwrap();
        assert!(offsets.contains(&0));
        assert!(offsets.contains(&(input.len() - 1)) );
    }
}
