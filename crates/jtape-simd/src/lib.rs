// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stage 1 structural indexer.
//!
//! Scans a padded input buffer in fixed 64-byte windows and produces the
//! structural-index stream Stage 2 consumes: the ascending byte offsets of
//! every structural character (`{ } [ ] : ,`), every opening string quote,
//! and every scalar-token start. See [`indexer::build_structural_index`].
//!
//! The classification is implemented with portable SWAR (SIMD-within-a-
//! register) bit tricks rather than platform SIMD intrinsics, so it runs
//! identically on stable Rust regardless of target architecture.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Per-window byte classification (structural/whitespace/quote/backslash).
pub mod classify;
/// Stage 1 entry point producing the structural-index stream.
pub mod indexer;
/// Bulk scanning helpers reused by Stage 2 (string/number/whitespace runs).
pub mod scan;
/// Cross-window string and escape-run tracking.
pub mod strings;

pub use classify::{classify_window, WindowMasks};
pub use indexer::build_structural_index;
pub use strings::{StringMasks, StringState};
