//! Error type shared by the whole crate.

use std::path::PathBuf;

/// Result type defaulting to [`MarkovError`].
pub type Result<T, E = MarkovError> = std::result::Result<T, E>;

/// Everything that can go wrong while building or configuring the model.
///
/// Generation itself never fails: once a [`CorpusRegistry`](crate::model::registry::CorpusRegistry)
/// is built, every error below belongs to the start-up phase and is fatal for
/// the caller.
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
	/// Raw I/O failure while reading a corpus stream.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// The corpus directory cannot be opened or listed.
	#[error("cannot read folder {path}: {source}")]
	CorpusDirectory {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A corpus file cannot be opened or read.
	#[error("cannot read {path}: {source}")]
	CorpusFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The corpus directory holds no regular file.
	#[error("no corpus file found in {0}")]
	EmptyRegistry(PathBuf),

	/// No multiplier produced a collision-free placement for a bucket.
	#[error("cannot build perfect hash table for bucket {bucket} ({entries} entries, {slots} slots)")]
	PerfectHashExhausted {
		bucket: usize,
		entries: usize,
		slots: usize,
	},

	/// A token that the tokenizer could never produce: empty or holding blanks.
	#[error("invalid token {0:?}")]
	InvalidToken(String),

	/// A link probability outside `[0, 1]`.
	#[error("probability must be between 0.0 and 1.0, got {0}")]
	InvalidProbability(f64),
}
