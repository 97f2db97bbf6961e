//! The string buffer: length-prefixed unescaped UTF-8 bytes (`spec.md` §3).
//!
//! Every string stored here is a 4-byte little-endian length followed by
//! that many content bytes, so any valid offset into the buffer can be read
//! without alignment concerns.

/// Owned, append-only store of unescaped string content.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    bytes: Vec<u8>,
}

impl StringBuffer {
    /// Create an empty string buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append `content`, length-prefixed, returning the offset at which it
    /// was written (the offset of the length prefix, per `spec.md` §3).
    ///
    /// # Panics
    ///
    /// Panics if `content` is longer than `u32::MAX` bytes.
    pub fn push(&mut self, content: &[u8]) -> u32 {
        let offset = u32::try_from(self.bytes.len()).expect("string buffer exceeds 4GiB");
        let len = u32::try_from(content.len()).expect("single string exceeds 4GiB");
        self.bytes.extend_from_slice(&len.to_le_bytes());
        self.bytes.extend_from_slice(content);
        offset
    }

    /// Read the string stored at `offset`: the 4-byte length prefix followed
    /// by that many bytes.
    ///
    /// # Panics
    ///
    /// Panics if `offset` does not point at a valid length-prefixed record
    /// within the buffer (an invariant the tape builder guarantees, per
    /// `spec.md` invariant I3).
    #[must_use]
    pub fn read(&self, offset: u32) -> &[u8] {
        let offset = offset as usize;
        let len = u32::from_le_bytes(self.bytes[offset..offset + 4].try_into().unwrap()) as usize;
        &self.bytes[offset + 4..offset + 4 + len]
    }

    /// Total size of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Discard all content while retaining allocated capacity, for reuse
    /// across parse calls.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
