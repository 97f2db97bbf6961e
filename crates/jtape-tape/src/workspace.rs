//! Reusable parse scratch (`spec.md` §9 "Reuse across parses", ambient
//! addition §4.7).
//!
//! Bundles the tape, string buffer, and Stage 1 structural-index scratch so
//! a caller can thread the same buffers through repeated `parse`/`parse_nd`
//! calls instead of allocating fresh ones each time. `Vec`'s amortized
//! doubling growth (`spec.md` §5 "Memory discipline") does the rest.

use crate::stringbuf::StringBuffer;
use crate::tape::Tape;

/// Reusable buffers threaded through repeated parse calls.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub(crate) tape: Tape,
    pub(crate) strings: StringBuffer,
    pub(crate) structural_scratch: Vec<u32>,
    pub(crate) padded_input: Vec<u8>,
}

impl Workspace {
    /// Create an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every buffer while retaining their allocated capacity.
    pub fn clear(&mut self) {
        self.tape.clear();
        self.strings.clear();
        self.structural_scratch.clear();
        self.padded_input.clear();
    }
}
