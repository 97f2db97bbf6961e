// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core error types and shared primitives for jtape.
//!
//! This crate provides the foundational types shared by the rest of the
//! jtape pipeline:
//!
//! - [`error`] - the parse error taxonomy and `Result` alias
//! - [`limits`] - shared window-width and depth constants

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Parse error taxonomy.
pub mod error;
/// Shared size and depth constants.
pub mod limits;

pub use error::{ParseError, Result};
pub use limits::{DEFAULT_MAX_DEPTH, WINDOW};
