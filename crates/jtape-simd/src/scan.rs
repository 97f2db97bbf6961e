//! Bulk byte-scanning helpers used by Stage 2 while consuming the bytes
//! between two structural-index offsets (string content, number literals,
//! and inter-token whitespace). Each scans 8 bytes at a time via the same
//! SWAR byte-equality technique used in [`crate::classify`], falling back to
//! a scalar loop for the final partial lane.

const LO: u64 = 0x0101_0101_0101_0101;
const HI: u64 = 0x8080_8080_8080_8080;

/// Branchless "does any byte in this 8-byte lane equal `0`" check, by the
/// standard bit trick: `((v - LO) & !v) & HI` is nonzero iff some byte of
/// `v` is zero. We repurpose it here to test any byte equals a target by
/// first XOR-ing the lane with a lane filled with the target byte, turning
/// equality into "is zero".
#[inline]
const fn zero_byte_mask(v: u64) -> u64 {
    v.wrapping_sub(LO) & !v & HI
}

#[inline]
const fn splat(byte: u8) -> u64 {
    (byte as u64) * LO
}

/// Find the first byte in `bytes` that is `"`, `\`, or a control byte
/// (`< 0x20`), or `None` if no such byte occurs. Used by the string scanner
/// to locate a string's closing quote and detect escapes/invalid control
/// bytes in one pass.
#[must_use]
pub fn find_special_in_string(bytes: &[u8]) -> Option<usize> {
    let quote = splat(b'"');
    let backslash = splat(b'\\');
    let mut i = 0usize;
    while i + 8 <= bytes.len() {
        let lane = u64::from_ne_bytes(bytes[i..i + 8].try_into().unwrap());
        let is_quote = zero_byte_mask(lane ^ quote);
        let is_backslash = zero_byte_mask(lane ^ backslash);
        // A control byte (`< 0x20`) has its top three bits zero; detect via
        // the classic "any byte < N" trick: (lane | 0x60606060...) has bit7
        // clear for bytes < 0x20, since 0x1F | 0x60 = 0x7F (bit7 clear) while
        // any byte >= 0x20 ORed with 0x60 keeps bit7 set whenever the byte's
        // own bit7 or bit6 was set; to stay simple and obviously correct we
        // fall back to a scalar control-byte check within this lane instead
        // of another bit trick.
        let hits = is_quote | is_backslash;
        if hits != 0 {
            for (j, &b) in bytes[i..i + 8].iter().enumerate() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    return Some(i + j);
                }
            }
        } else {
            for (j, &b) in bytes[i..i + 8].iter().enumerate() {
                if b < 0x20 {
                    return Some(i + j);
                }
            }
        }
        i += 8;
    }
    bytes[i..]
        .iter()
        .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
        .map(|p| i + p)
}

/// Advance `pos` past any run of JSON whitespace (space, tab, LF, CR)
/// starting at `pos`.
pub fn skip_whitespace(bytes: &[u8], pos: &mut usize) {
    while *pos < bytes.len() && matches!(bytes[*pos], b' ' | b'\t' | b'\n' | b'\r') {
        *pos += 1;
    }
}

/// Advance `pos` past any run of ASCII digits starting at `pos`, returning
/// the number of digits consumed.
pub fn skip_ascii_digits(bytes: &[u8], pos: &mut usize) -> usize {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    *pos - start
}
