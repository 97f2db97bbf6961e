//! Tape traversal, lookup, typed accessors, setters, and re-serialization
//! (`spec.md` §4.3).
//!
//! Iterators borrow from a [`crate::parsed::ParsedJson`] and are invalidated
//! by any later re-parse into the same buffers; they are cheap `Copy` values
//! (a reference plus a tape index).

use std::fmt::Write as _;

use jtape_core::{ParseError, Result};

use crate::parsed::ParsedJson;
use crate::tape::{self, StringLocation};

/// The JSON type of the value a [`ValueIter`] is positioned at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// A number that fits `i64` or, lossily, came from a wider integer.
    Int,
    /// A number in `(i64::MAX, u64::MAX]`.
    Uint,
    /// A number with a fraction or exponent, or one too large for `u64`.
    Double,
    /// A string.
    String,
    /// An object.
    Object,
    /// An array.
    Array,
}

/// A cursor onto a single value in a [`ParsedJson`]'s tape. Cheap to copy;
/// does not own any memory.
#[derive(Debug, Clone, Copy)]
pub struct ValueIter<'a> {
    parsed: &'a ParsedJson,
    index: usize,
}

/// Yields `(key_bytes, value)` pairs from an object's open entry through its
/// matching close, in source order.
#[derive(Debug, Clone, Copy)]
pub struct ObjectIter<'a> {
    parsed: &'a ParsedJson,
    pos: usize,
    end: usize,
}

/// Yields successive element [`ValueIter`]s from an array's open entry
/// through its matching close, in source order.
#[derive(Debug, Clone, Copy)]
pub struct ArrayIter<'a> {
    parsed: &'a ParsedJson,
    pos: usize,
    end: usize,
}

/// One segment of a dotted lookup path passed to [`ValueIter::find_element`].
#[derive(Debug, Clone, Copy)]
pub enum PathSegment<'p> {
    /// An object key.
    Key(&'p str),
    /// An array index.
    Index(usize),
}

/// Number of tape slots a value starting at `index` occupies, including
/// itself: 2 for the wide numeric tags, `close - index + 1` for a
/// container, 1 for everything else. Used both to advance iterators and to
/// implement O(1) subtree skip.
fn value_span(parsed: &ParsedJson, index: usize) -> usize {
    let entry = parsed.tape().get(index);
    match tape::tag_of(entry) {
        tape::TAG_INT | tape::TAG_UINT | tape::TAG_DOUBLE => 2,
        tape::TAG_OBJECT_OPEN | tape::TAG_ARRAY_OPEN => {
            let close = tape::payload_of(entry) as usize;
            close - index + 1
        }
        _ => 1,
    }
}

impl<'a> ValueIter<'a> {
    pub(crate) const fn new(parsed: &'a ParsedJson, index: usize) -> Self {
        Self { parsed, index }
    }

    /// The tape index this cursor is positioned at.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The JSON type of the value under this cursor.
    #[must_use]
    pub fn r#type(&self) -> Type {
        match tape::tag_of(self.parsed.tape().get(self.index)) {
            tape::TAG_NULL => Type::Null,
            tape::TAG_TRUE | tape::TAG_FALSE => Type::Bool,
            tape::TAG_INT => Type::Int,
            tape::TAG_UINT => Type::Uint,
            tape::TAG_DOUBLE => Type::Double,
            tape::TAG_STRING => Type::String,
            tape::TAG_OBJECT_OPEN => Type::Object,
            tape::TAG_ARRAY_OPEN => Type::Array,
            other => unreachable!("value cursor positioned at non-value tag {other:#04x}"),
        }
    }

    /// The tape index one past this value's subtree; the O(1) skip
    /// primitive `spec.md` §4.3 describes.
    #[must_use]
    pub fn skip(&self) -> usize {
        self.index + value_span(self.parsed, self.index)
    }

    /// `true`/`false` as a `bool`, or `None` if this value is not a bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match tape::tag_of(self.parsed.tape().get(self.index)) {
            tape::TAG_TRUE => Some(true),
            tape::TAG_FALSE => Some(false),
            _ => None,
        }
    }

    /// Signed interpretation: always succeeds for `l`, and for `u` when the
    /// stored value is `<= i64::MAX`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        let entry = self.parsed.tape().get(self.index);
        match tape::tag_of(entry) {
            tape::TAG_INT => Some(self.parsed.tape().get(self.index + 1) as i64),
            tape::TAG_UINT => {
                let bits = self.parsed.tape().get(self.index + 1);
                i64::try_from(bits).ok()
            }
            _ => None,
        }
    }

    /// Unsigned interpretation: always succeeds for `u`, and for `l` when
    /// the stored value is non-negative.
    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        let entry = self.parsed.tape().get(self.index);
        match tape::tag_of(entry) {
            tape::TAG_UINT => Some(self.parsed.tape().get(self.index + 1)),
            tape::TAG_INT => {
                let bits = self.parsed.tape().get(self.index + 1) as i64;
                u64::try_from(bits).ok()
            }
            _ => None,
        }
    }

    /// Floating-point interpretation: always succeeds for `d`; lossily
    /// succeeds for `l`/`u` via an `as` cast.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        let entry = self.parsed.tape().get(self.index);
        match tape::tag_of(entry) {
            tape::TAG_DOUBLE => Some(f64::from_bits(self.parsed.tape().get(self.index + 1))),
            tape::TAG_INT => Some(self.parsed.tape().get(self.index + 1) as i64 as f64),
            tape::TAG_UINT => Some(self.parsed.tape().get(self.index + 1) as f64),
            _ => None,
        }
    }

    /// Raw unescaped string bytes (`StringBytes`), or `None` if this value
    /// is not a string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        let entry = self.parsed.tape().get(self.index);
        if tape::tag_of(entry) != tape::TAG_STRING {
            return None;
        }
        Some(self.parsed.read_string(tape::decode_string_payload(tape::payload_of(entry))))
    }

    /// String content as `&str` (`String`). The tape's invariant that all
    /// stored/aliased string content is valid UTF-8 makes this infallible
    /// once `as_bytes` succeeds.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes()
            .map(|b| std::str::from_utf8(b).expect("tape string content is valid UTF-8"))
    }

    /// Format any scalar value as a string (`StringCvt`). Returns `None`
    /// for objects and arrays.
    #[must_use]
    pub fn as_string_cvt(&self) -> Option<String> {
        match self.r#type() {
            Type::Null => Some("null".to_owned()),
            Type::Bool => self.as_bool().map(|b| b.to_string()),
            Type::Int => self.as_int().map(|v| v.to_string()),
            Type::Uint => self.as_uint().map(|v| v.to_string()),
            Type::Double => self.as_float().map(|v| v.to_string()),
            Type::String => self.as_str().map(ToOwned::to_owned),
            Type::Object | Type::Array => None,
        }
    }

    /// View this value as an object, or `None` if it is not one.
    #[must_use]
    pub fn object(&self) -> Option<ObjectIter<'a>> {
        let entry = self.parsed.tape().get(self.index);
        if tape::tag_of(entry) != tape::TAG_OBJECT_OPEN {
            return None;
        }
        Some(ObjectIter {
            parsed: self.parsed,
            pos: self.index + 1,
            end: tape::payload_of(entry) as usize,
        })
    }

    /// View this value as an array, or `None` if it is not one.
    #[must_use]
    pub fn array(&self) -> Option<ArrayIter<'a>> {
        let entry = self.parsed.tape().get(self.index);
        if tape::tag_of(entry) != tape::TAG_ARRAY_OPEN {
            return None;
        }
        Some(ArrayIter {
            parsed: self.parsed,
            pos: self.index + 1,
            end: tape::payload_of(entry) as usize,
        })
    }

    /// Find the first child of this object whose key equals `key`
    /// (`FindKey`), honoring first-wins for duplicate keys.
    #[must_use]
    pub fn find_key(&self, key: &str) -> Option<ValueIter<'a>> {
        self.object()?.find(|(k, _)| *k == key.as_bytes()).map(|(_, v)| v)
    }

    /// Recursively resolve a dotted path (`FindElement`): object segments
    /// look up by key, array segments select by index.
    #[must_use]
    pub fn find_element(&self, path: &[PathSegment<'_>]) -> Option<ValueIter<'a>> {
        let mut current = *self;
        for segment in path {
            current = match segment {
                PathSegment::Key(name) => current.find_key(name)?,
                PathSegment::Index(i) => current.array()?.nth(*i)?,
            };
        }
        Some(current)
    }

    /// Re-serialize this value (and its subtree) as canonical JSON.
    #[must_use]
    pub fn marshal_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }

    fn write_json(&self, out: &mut String) {
        match self.r#type() {
            Type::Null => out.push_str("null"),
            Type::Bool => out.push_str(if self.as_bool().unwrap() { "true" } else { "false" }),
            Type::Int => {
                write!(out, "{}", self.as_int().unwrap()).unwrap();
            }
            Type::Uint => {
                write!(out, "{}", self.as_uint().unwrap()).unwrap();
            }
            Type::Double => {
                write!(out, "{}", self.as_float().unwrap()).unwrap();
            }
            Type::String => {
                write_json_string(out, self.as_bytes().unwrap());
            }
            Type::Object => {
                out.push('{');
                for (i, (key, value)) in self.object().unwrap().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_json_string(out, key);
                    out.push(':');
                    value.write_json(out);
                }
                out.push('}');
            }
            Type::Array => {
                out.push('[');
                for (i, value) in self.array().unwrap().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    value.write_json(out);
                }
                out.push(']');
            }
        }
    }
}

fn write_json_string(out: &mut String, bytes: &[u8]) {
    out.push('"');
    let s = std::str::from_utf8(bytes).expect("tape string content is valid UTF-8");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                write!(out, "\\u{:04x}", c as u32).unwrap();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a [u8], ValueIter<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let key_entry = self.parsed.tape().get(self.pos);
        debug_assert_eq!(tape::tag_of(key_entry), tape::TAG_STRING, "object key must be a string entry");
        let key = self
            .parsed
            .read_string(tape::decode_string_payload(tape::payload_of(key_entry)));
        let value_index = self.pos + 1;
        let span = value_span(self.parsed, value_index);
        self.pos = value_index + span;
        Some((key, ValueIter::new(self.parsed, value_index)))
    }
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = ValueIter<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let index = self.pos;
        let span = value_span(self.parsed, index);
        self.pos = index + span;
        Some(ValueIter::new(self.parsed, index))
    }
}

/// In-place scalar setters (`spec.md` §4.3 "In-place setters"). These are
/// the only writers `ParsedJson` permits after a successful parse.
impl ParsedJson {
    /// Overwrite an `l`-tagged entry's value. Fails if the tape index does
    /// not hold an `l` entry.
    pub fn set_int(&mut self, index: usize, value: i64) -> Result<()> {
        self.require_tag(index, tape::TAG_INT)?;
        self.tape_mut().set_number_bits(index, value as u64);
        Ok(())
    }

    /// Overwrite a `u`-tagged entry's value. Fails if the tape index does
    /// not hold a `u` entry.
    pub fn set_uint(&mut self, index: usize, value: u64) -> Result<()> {
        self.require_tag(index, tape::TAG_UINT)?;
        self.tape_mut().set_number_bits(index, value);
        Ok(())
    }

    /// Overwrite a `d`-tagged entry's value. Fails if the tape index does
    /// not hold a `d` entry.
    pub fn set_float(&mut self, index: usize, value: f64) -> Result<()> {
        self.require_tag(index, tape::TAG_DOUBLE)?;
        self.tape_mut().set_number_bits(index, value.to_bits());
        Ok(())
    }

    /// Overwrite a `"`-tagged entry's value by appending `value` to the
    /// string buffer and repointing the entry at it. Fails if the tape
    /// index does not hold a string entry.
    pub fn set_string(&mut self, index: usize, value: &[u8]) -> Result<()> {
        self.require_tag(index, tape::TAG_STRING)?;
        let offset = self.strings_mut().push(value);
        let payload = tape::encode_string_payload(StringLocation::Buffered(offset));
        self.tape_mut().set_payload(index, payload);
        Ok(())
    }

    fn require_tag(&self, index: usize, tag: u8) -> Result<()> {
        if tape::tag_of(self.tape().get(index)) == tag {
            Ok(())
        } else {
            Err(ParseError::TagMismatch { index })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserConfig;
    use crate::parsed::parse;

    fn doc(input: &str) -> crate::parsed::ParsedJson {
        parse(input.as_bytes(), &ParserConfig::default()).unwrap()
    }

    #[test]
    fn nested_lookup_and_skip() {
        let pj = doc(r#"{"a":1,"b":[true,null,"x"]}"#);
        let root = pj.iter();
        let b = root.find_key("b").unwrap();
        let x = b.array().unwrap().nth(2).unwrap();
        assert_eq!(x.as_str(), Some("x"));
    }

    #[test]
    fn find_element_matches_stepwise_lookup() {
        use crate::iter::PathSegment;
        let pj = doc(r#"{"a":1,"b":[true,null,"x"]}"#);
        let root = pj.iter();
        let via_path = root
            .find_element(&[PathSegment::Key("b"), PathSegment::Index(2)])
            .unwrap();
        let stepwise = root.find_key("b").unwrap().array().unwrap().nth(2).unwrap();
        assert_eq!(via_path.as_str(), stepwise.as_str());
    }

    #[test]
    fn duplicate_keys_first_wins() {
        let pj = doc(r#"{"a":1,"a":2}"#);
        let root = pj.iter();
        assert_eq!(root.find_key("a").unwrap().as_int(), Some(1));
        let keys: Vec<_> = root.object().unwrap().map(|(k, _)| k.to_vec()).collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"a".to_vec()]);
    }

    #[test]
    fn number_boundary_accessors() {
        let pj = doc(r#"{"n":9223372036854775808}"#);
        let n = pj.iter().find_key("n").unwrap();
        assert_eq!(n.as_int(), None);
        assert_eq!(n.as_uint(), Some(9_223_372_036_854_775_808));

        let pj2 = doc(r#"{"n":18446744073709551616}"#);
        let n2 = pj2.iter().find_key("n").unwrap();
        assert_eq!(n2.as_int(), None);
        assert_eq!(n2.as_uint(), None);
        assert!((n2.as_float().unwrap() - 1.844_674_407_370_955_2e19).abs() < 1e4);
    }

    #[test]
    fn marshal_json_round_trips_structure() {
        let pj = doc(r#"{"a":1,"b":[true,null,"x"]}"#);
        let text = pj.iter().marshal_json();
        let reparsed = parse(text.as_bytes(), &ParserConfig::default()).unwrap();
        assert_eq!(reparsed.iter().find_key("a").unwrap().as_int(), Some(1));
    }

    #[test]
    fn set_int_requires_matching_tag() {
        let mut pj = doc(r#"{"a":1}"#);
        let idx = pj.iter().find_key("a").unwrap().index();
        pj.set_int(idx, 99).unwrap();
        assert_eq!(pj.iter().find_key("a").unwrap().as_int(), Some(99));

        let err = pj.set_float(idx, 1.0).unwrap_err();
        assert!(matches!(err, jtape_core::ParseError::TagMismatch { .. }));
    }
}
