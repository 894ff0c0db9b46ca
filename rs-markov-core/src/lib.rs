//! Markov-chain page generation library.
//!
//! This crate provides the text model behind a synthetic web site:
//! - Word-level tokenization of corpus files
//! - A fixed-order (two words) prefix index, re-indexed as perfect hash tables
//! - A registry of immutable corpora shared by every request
//! - Deterministic page generation with randomized links
//!
//! The registry is built once, single-threaded, at start-up. Afterwards it is
//! never mutated, so it can be shared by reference across threads without any
//! lock.

/// Crate-wide error type.
pub mod error;

/// Corpus model and generation logic.
pub mod model;

/// Directory and path helpers.
///
/// Not exposed
pub(crate) mod io;

pub use error::{MarkovError, Result};
