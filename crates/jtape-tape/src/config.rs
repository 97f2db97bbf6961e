//! Parser configuration (`spec.md` §6, ambient addition §4.6).
//!
//! The only configuration surface `jtape` has: no file or environment-based
//! configuration exists anywhere in this crate.

use jtape_core::DEFAULT_MAX_DEPTH;

/// Options recognized by `parse`/`parse_with`/`parse_nd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// When `true` (the default), escape-free string values are copied into
    /// the string buffer like every other string. When `false`, escape-free
    /// string *values* (never keys, which are always copied so lookup paths
    /// stay uniform) are aliased to the original input buffer instead.
    pub copy_strings: bool,
    /// Maximum container nesting depth. Inputs nested deeper than this are
    /// rejected with [`jtape_core::ParseError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            copy_strings: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Start from the defaults (`copy_strings: true`, `max_depth: 1024`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for [`ParserConfig::copy_strings`].
    #[must_use]
    pub const fn with_copy_strings(mut self, copy_strings: bool) -> Self {
        self.copy_strings = copy_strings;
        self
    }

    /// Builder-style setter for [`ParserConfig::max_depth`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = ParserConfig::default();
        assert!(cfg.copy_strings);
        assert_eq!(cfg.max_depth, 1024);
    }

    #[test]
    fn builder_overrides() {
        let cfg = ParserConfig::new().with_copy_strings(false).with_max_depth(8);
        assert!(!cfg.copy_strings);
        assert_eq!(cfg.max_depth, 8);
    }
}
