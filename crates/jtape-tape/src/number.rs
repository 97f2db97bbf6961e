//! Number token scanning and parsing (`spec.md` §4.2, scalar parsing
//! contracts).
//!
//! The structural index only marks a number's first byte; this module walks
//! the JSON number grammar directly over the input buffer to find the
//! token's extent, then hands the token to `lexical-core` for the actual
//! conversion, matching the fast-path/validated-grammar split used in
//! `jeffhuen-RustyJson`'s `direct_decode::parse_number`.

use jtape_core::{ParseError, Result};
use jtape_simd::scan::skip_ascii_digits;

/// The parsed value of a JSON number token, already classified into the
/// narrowest representation the grammar and magnitude allow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    /// Fits in a signed 64-bit integer.
    Int(i64),
    /// Does not fit in `i64` but fits in `u64` (i.e. in `(2^63, 2^64)`).
    Uint(u64),
    /// Has a fraction or exponent, or is too large for either integer type.
    Double(f64),
}

/// Scan and parse the JSON number token starting at `input[start]`.
///
/// Returns the parsed value and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if the bytes at `start` do not
/// match JSON number grammar, or [`ParseError::NumberOverflow`] if the
/// token's magnitude is not representable even as `f64` (rounds to
/// infinity).
pub fn parse_number(input: &[u8], start: usize) -> Result<(NumberValue, usize)> {
    let mut pos = start;
    let negative = input.get(pos) == Some(&b'-');
    if negative {
        pos += 1;
    }

    let int_start = pos;
    match input.get(pos) {
        Some(b'0') => pos += 1,
        Some(b) if b.is_ascii_digit() => {
            skip_ascii_digits(input, &mut pos);
        }
        _ => return Err(ParseError::InvalidNumber { offset: start }),
    }
    if pos == int_start {
        return Err(ParseError::InvalidNumber { offset: start });
    }

    let mut is_float = false;

    if input.get(pos) == Some(&b'.') {
        is_float = true;
        pos += 1;
        let frac_start = pos;
        skip_ascii_digits(input, &mut pos);
        if pos == frac_start {
            return Err(ParseError::InvalidNumber { offset: start });
        }
    }

    if matches!(input.get(pos), Some(b'e' | b'E')) {
        is_float = true;
        pos += 1;
        if matches!(input.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        skip_ascii_digits(input, &mut pos);
        if pos == exp_start {
            return Err(ParseError::InvalidNumber { offset: start });
        }
    }

    let token = &input[start..pos];
    let value = if is_float {
        parse_as_double(token, start)?
    } else if negative {
        parse_integer_token(token, start, false)?
    } else {
        parse_integer_token(token, start, true)?
    };

    Ok((value, pos - start))
}

fn parse_as_double(token: &[u8], start: usize) -> Result<NumberValue> {
    let f: f64 =
        lexical_core::parse(token).map_err(|_| ParseError::InvalidNumber { offset: start })?;
    if f.is_infinite() {
        return Err(ParseError::NumberOverflow { offset: start });
    }
    Ok(NumberValue::Double(f))
}

fn parse_integer_token(token: &[u8], start: usize, allow_uint: bool) -> Result<NumberValue> {
    if let Ok(i) = lexical_core::parse::<i64>(token) {
        return Ok(NumberValue::Int(i));
    }
    if allow_uint {
        if let Ok(u) = lexical_core::parse::<u64>(token) {
            return Ok(NumberValue::Uint(u));
        }
    }
    parse_as_double(token, start)
}
