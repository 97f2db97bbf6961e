//! String literal unescaping (`spec.md` §4.4).
//!
//! Given the offset of a string's opening quote, scans to its closing
//! (unescaped) quote, decoding any escape sequences along the way, and
//! appends the result to the string buffer -- or, for escape-free string
//! values when `copy_strings` is disabled, aliases directly to the input.

use jtape_core::{ParseError, Result};
use jtape_simd::scan;

use crate::stringbuf::StringBuffer;
use crate::tape::StringLocation;

/// Consume the string literal whose opening quote is at `input[quote_offset]`.
///
/// Returns the tape payload location for the string and the offset of the
/// byte immediately following the closing quote.
///
/// `is_key` forces copying into the string buffer regardless of
/// `copy_strings`, per `spec.md` §4.4 ("Keys are always copied to the
/// string buffer to keep lookup paths uniform").
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedString`] if no closing quote is found,
/// [`ParseError::ControlCharacterInString`] if an unescaped control byte
/// (`< 0x20`) appears in the content, [`ParseError::InvalidEscape`] for an
/// unrecognized `\` sequence, [`ParseError::InvalidUnicodeEscape`] /
/// [`ParseError::LoneSurrogate`] for malformed `\uXXXX` escapes, or
/// [`ParseError::InvalidUtf8`] if the literal (unescaped) content is not
/// valid UTF-8.
pub fn consume_string(
    input: &[u8],
    quote_offset: usize,
    is_key: bool,
    copy_strings: bool,
    strings: &mut StringBuffer,
) -> Result<(StringLocation, usize)> {
    let content_start = quote_offset + 1;
    let rel = scan::find_special_in_string(&input[content_start..])
        .ok_or(ParseError::UnterminatedString { offset: quote_offset })?;
    let at = content_start + rel;

    match input[at] {
        b'"' => {
            let content = &input[content_start..at];
            validate_utf8(content, content_start)?;
            let location = if is_key || copy_strings {
                StringLocation::Buffered(strings.push(content))
            } else {
                StringLocation::AliasedInput(u32::try_from(content_start).unwrap_or(u32::MAX))
            };
            Ok((location, at + 1))
        }
        b'\\' => decode_escaped(input, quote_offset, content_start, strings),
        b if b < 0x20 => Err(ParseError::ControlCharacterInString { offset: at }),
        _ => unreachable!("find_special_in_string only returns '\"', '\\\\', or control bytes"),
    }
}

/// Check that a raw (not-yet-escape-decoded) slice copied verbatim from the
/// input is valid UTF-8, reporting the offset of the first bad byte within
/// `input` rather than within `chunk`.
fn validate_utf8(chunk: &[u8], chunk_start: usize) -> Result<()> {
    std::str::from_utf8(chunk)
        .map(|_| ())
        .map_err(|e| ParseError::InvalidUtf8 { offset: chunk_start + e.valid_up_to() })
}

fn decode_escaped(
    input: &[u8],
    quote_offset: usize,
    content_start: usize,
    strings: &mut StringBuffer,
) -> Result<(StringLocation, usize)> {
    let mut buf = Vec::with_capacity(32);
    let mut pos = content_start;
    loop {
        let rel = scan::find_special_in_string(&input[pos..])
            .ok_or(ParseError::UnterminatedString { offset: quote_offset })?;
        let at = pos + rel;
        validate_utf8(&input[pos..at], pos)?;
        buf.extend_from_slice(&input[pos..at]);

        match input[at] {
            b'"' => {
                pos = at + 1;
                break;
            }
            b'\\' => {
                let escape_offset = at;
                let next = *input
                    .get(at + 1)
                    .ok_or(ParseError::InvalidEscape { offset: escape_offset })?;
                match next {
                    b'"' => {
                        buf.push(b'"');
                        pos = at + 2;
                    }
                    b'\\' => {
                        buf.push(b'\\');
                        pos = at + 2;
                    }
                    b'/' => {
                        buf.push(b'/');
                        pos = at + 2;
                    }
                    b'b' => {
                        buf.push(0x08);
                        pos = at + 2;
                    }
                    b'f' => {
                        buf.push(0x0C);
                        pos = at + 2;
                    }
                    b'n' => {
                        buf.push(b'\n');
                        pos = at + 2;
                    }
                    b'r' => {
                        buf.push(b'\r');
                        pos = at + 2;
                    }
                    b't' => {
                        buf.push(b'\t');
                        pos = at + 2;
                    }
                    b'u' => {
                        let (ch, consumed) = decode_unicode_escape(input, escape_offset)?;
                        let mut tmp = [0u8; 4];
                        buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
                        pos = escape_offset + consumed;
                    }
                    _ => return Err(ParseError::InvalidEscape { offset: escape_offset }),
                }
            }
            b if b < 0x20 => return Err(ParseError::ControlCharacterInString { offset: at }),
            _ => unreachable!("find_special_in_string only returns '\"', '\\\\', or control bytes"),
        }
    }
    Ok((StringLocation::Buffered(strings.push(&buf)), pos))
}

/// Decode a `\uXXXX` escape (and its paired low surrogate, if `\uXXXX` names
/// a high surrogate) starting at the backslash offset. Returns the decoded
/// character and the number of input bytes the whole escape consumed
/// (6 for a lone `\uXXXX`, 12 for a surrogate pair).
fn decode_unicode_escape(input: &[u8], backslash_offset: usize) -> Result<(char, usize)> {
    let first = parse_hex4(input, backslash_offset + 2, backslash_offset)?;

    if (0xDC00..=0xDFFF).contains(&first) {
        return Err(ParseError::LoneSurrogate { offset: backslash_offset });
    }

    if (0xD800..=0xDBFF).contains(&first) {
        if input.get(backslash_offset + 6) != Some(&b'\\')
            || input.get(backslash_offset + 7) != Some(&b'u')
        {
            return Err(ParseError::LoneSurrogate { offset: backslash_offset });
        }
        let second = parse_hex4(input, backslash_offset + 8, backslash_offset)?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(ParseError::LoneSurrogate { offset: backslash_offset });
        }
        let code_point = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
        let ch = char::from_u32(code_point)
            .ok_or(ParseError::InvalidUnicodeEscape { offset: backslash_offset })?;
        return Ok((ch, 12));
    }

    let ch =
        char::from_u32(first).ok_or(ParseError::InvalidUnicodeEscape { offset: backslash_offset })?;
    Ok((ch, 6))
}

fn parse_hex4(input: &[u8], start: usize, escape_offset: usize) -> Result<u32> {
    let bytes = input
        .get(start..start + 4)
        .ok_or(ParseError::InvalidUnicodeEscape { offset: escape_offset })?;
    let s = std::str::from_utf8(bytes)
        .map_err(|_| ParseError::InvalidUnicodeEscape { offset: escape_offset })?;
    u32::from_str_radix(s, 16).map_err(|_| ParseError::InvalidUnicodeEscape { offset: escape_offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, copy_strings: bool) -> (Vec<u8>, usize) {
        let mut strings = StringBuffer::new();
        let (loc, end) =
            consume_string(input.as_bytes(), 0, false, copy_strings, &mut strings).unwrap();
        let bytes = match loc {
            StringLocation::Buffered(off) => strings.read(off).to_vec(),
            StringLocation::AliasedInput(off) => {
                let start = off as usize;
                let close = memchr::memchr(b'"', &input.as_bytes()[start..]).unwrap();
                input.as_bytes()[start..start + close].to_vec()
            }
        };
        (bytes, end)
    }

    #[test]
    fn plain_string_copied() {
        let (bytes, end) = run(r#""hello""#, true);
        assert_eq!(bytes, b"hello");
        assert_eq!(end, 7);
    }

    #[test]
    fn plain_string_aliased_when_copy_strings_false() {
        let (bytes, _) = run(r#""hello""#, false);
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn simple_escapes() {
        let (bytes, _) = run(r#""a\n\t\"b""#, true);
        assert_eq!(bytes, b"a\n\t\"b");
    }

    #[test]
    fn unicode_escape() {
        let (bytes, _) = run(r#""aAb""#, true);
        assert_eq!(bytes, b"aAb");
    }

    #[test]
    fn surrogate_pair() {
        let (bytes, _) = run(r#""𝄞""#, true);
        assert_eq!(String::from_utf8(bytes).unwrap(), "\u{1D11E}");
    }

    #[test]
    fn lone_surrogate_is_error() {
        let mut strings = StringBuffer::new();
        let err = consume_string(br#""\uD834""#, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::LoneSurrogate { .. }));
    }

    #[test]
    fn control_byte_is_error() {
        let mut strings = StringBuffer::new();
        let input = b"\"a\nb\"";
        let err = consume_string(input, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::ControlCharacterInString { .. }));
    }

    #[test]
    fn invalid_escape_is_error() {
        let mut strings = StringBuffer::new();
        let err = consume_string(br#""a\qb""#, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEscape { .. }));
    }

    #[test]
    fn unterminated_string_is_error() {
        let mut strings = StringBuffer::new();
        let err = consume_string(br#""abc"#, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }

    #[test]
    fn invalid_utf8_byte_in_plain_content_is_error() {
        let mut strings = StringBuffer::new();
        let input = b"\"a\xFFb\"";
        let err = consume_string(input, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { offset: 2 }));
    }

    #[test]
    fn invalid_utf8_byte_before_an_escape_is_error() {
        let mut strings = StringBuffer::new();
        let input = b"\"a\xFFb\\n\"";
        let err = consume_string(input, 0, false, true, &mut strings).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { offset: 2 }));
    }

    #[test]
    fn empty_string_key_roundtrips() {
        let mut strings = StringBuffer::new();
        let (loc, end) = consume_string(br#""""#, 0, true, true, &mut strings).unwrap();
        assert_eq!(end, 2);
        match loc {
            StringLocation::Buffered(off) => assert_eq!(strings.read(off), b""),
            StringLocation::AliasedInput(_) => panic!("keys are always buffered"),
        }
    }
}
