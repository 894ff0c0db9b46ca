use std::path::Path;

use log::info;

use super::corpus::CorpusIndex;
use crate::error::{MarkovError, Result};
use crate::io;

/// Every corpus loaded at start-up.
///
/// # Responsibilities
/// - Build one [`CorpusIndex`] per regular file of a directory
/// - Select a corpus from a draw of the request's random stream
///
/// # Invariants
/// - Never empty
/// - Never mutated after [`build`](CorpusRegistry::build): it is shared
///   read-only by every request, across threads, without any lock
#[derive(Debug)]
pub struct CorpusRegistry {
	corpora: Vec<CorpusIndex>,
}

impl CorpusRegistry {
	/// Builds one corpus per regular file found in `directory`.
	///
	/// # Behavior
	/// - `"."` and `"./"` resolve to the current directory.
	/// - Files are loaded in directory-iteration order; that order is the one
	///   used by [`select`](CorpusRegistry::select).
	/// - Directories, symlinks and special files are skipped.
	///
	/// # Errors
	/// - [`MarkovError::CorpusDirectory`] if the directory cannot be listed
	/// - [`MarkovError::CorpusFile`] if any file cannot be read: a partial
	///   registry is never returned
	/// - [`MarkovError::PerfectHashExhausted`] if a corpus cannot be re-indexed
	/// - [`MarkovError::EmptyRegistry`] if no regular file was found
	pub fn build<P: AsRef<Path>>(directory: P) -> Result<Self> {
		let folder = io::normalize_folder(directory.as_ref());

		let files = io::list_regular_files(&folder).map_err(|source| MarkovError::CorpusDirectory {
			path: folder.clone(),
			source,
		})?;

		let mut corpora = Vec::with_capacity(files.len());
		for file in files {
			info!("loading {}", file.display());
			corpora.push(CorpusIndex::from_file(&file)?);
		}

		let registry = Self::from_corpora(corpora).ok_or(MarkovError::EmptyRegistry(folder))?;
		info!("{} corpora loaded", registry.len());
		Ok(registry)
	}

	/// Wraps already built corpora. Returns `None` if `corpora` is empty.
	pub fn from_corpora(corpora: Vec<CorpusIndex>) -> Option<Self> {
		(!corpora.is_empty()).then_some(Self { corpora })
	}

	/// Corpus picked by a draw: `corpora[draw % len]`.
	pub fn select(&self, draw: u32) -> &CorpusIndex {
		&self.corpora[draw as usize % self.corpora.len()]
	}

	pub fn get(&self, index: usize) -> Option<&CorpusIndex> {
		self.corpora.get(index)
	}

	pub fn len(&self) -> usize {
		self.corpora.len()
	}

	/// Always `false`; kept for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.corpora.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CorpusIndex> {
		self.corpora.iter()
	}

	/// Corpus names, in selection order.
	pub fn names(&self) -> Vec<String> {
		self.corpora.iter().map(|c| c.name().to_owned()).collect()
	}
}
