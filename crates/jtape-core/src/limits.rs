//! Shared size and depth constants.

/// Width of a Stage 1 classification window, in bytes.
///
/// The structural indexer processes input in fixed windows of this size;
/// Stage 1's cross-window carry state (in-string, odd-backslash-run) is
/// defined in terms of this width.
pub const WINDOW: usize = 64;

/// Default maximum container nesting depth (`spec.md` §3, invariant I5).
pub const DEFAULT_MAX_DEPTH: usize = 1024;
