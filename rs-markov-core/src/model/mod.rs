//! Top-level module for the Markov page generator.
//!
//! This module provides:
//! - Tokens and prefixes (`word`, `tokenizer`)
//! - The chained and perfect-hash prefix indices (`prefix_index`, `perfect_hash`)
//! - Per-file models and the registry of all of them (`corpus`, `registry`)
//! - Deterministic generation of fragments and pages (`random`, `generator`, `page`)

/// Words, vocabulary and prefixes.
pub mod word;

/// Whitespace tokenizer over raw bytes.
pub mod tokenizer;

/// A prefix and the multiset of its observed suffixes.
pub mod entry;

/// Chained prefix index built while reading a corpus.
pub mod prefix_index;

/// Collision-free re-indexing of the chained index.
pub mod perfect_hash;

/// Model of a single corpus file.
pub mod corpus;

/// Every corpus loaded at start-up.
pub mod registry;

/// Seedable draw stream.
pub mod random;

/// Link parameters of generated pages.
pub mod link_config;

/// Random walk producing the markup fragment.
pub mod generator;

/// Page addressing and document shell.
pub mod page;
