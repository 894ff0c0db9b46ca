use super::entry::Entry;
use super::word::{Prefix, Vocabulary, Word};

/// Number of buckets of a prefix index.
pub const BUCKET_COUNT: usize = 40_930;

/// Byte folded in after each prefix component, so that `["a", "bc"]` and
/// `["ab", "c"]` feed different sequences to the hash.
const FIELD_SEPARATOR: u64 = 1;

/// Read access to prefix entries, whatever the table layout.
pub trait PrefixLookup {
	/// Returns the entry for `prefix`, or `None` if it was never inserted.
	fn lookup(&self, prefix: &Prefix) -> Option<&Entry>;
}

/// Polynomial fold over the bytes of every component of `prefix`.
fn fold(prefix: &Prefix, vocabulary: &Vocabulary, init: u64, multiplier: u64) -> u64 {
	let mut h = init;
	for word in prefix.words() {
		for &byte in vocabulary.bytes(*word) {
			h = h.wrapping_mul(multiplier).wrapping_add(byte as u64);
		}
		h = h.wrapping_mul(multiplier).wrapping_add(FIELD_SEPARATOR);
	}
	h
}

/// Bucket of a prefix (djb2 fold).
pub(crate) fn bucket_hash(prefix: &Prefix, vocabulary: &Vocabulary) -> usize {
	(fold(prefix, vocabulary, 5381, 33) % BUCKET_COUNT as u64) as usize
}

/// Slot of a prefix inside a bucket table of `slot_count` slots.
pub(crate) fn slot_hash(prefix: &Prefix, vocabulary: &Vocabulary, multiplier: u64, slot_count: usize) -> usize {
	(fold(prefix, vocabulary, 0, multiplier) % slot_count as u64) as usize
}

/// Identifier of an entry inside the entry arena.
pub(crate) type EntryId = u32;

/// Prefix index as built from a corpus: chained hash table.
///
/// Entries live in one arena; every bucket is a singly linked chain of arena
/// indices, newest entry first.
///
/// # Invariants
/// - Each prefix has at most one entry
/// - `links.len() == entries.len()`
#[derive(Debug)]
pub struct ChainedIndex {
	heads: Vec<Option<EntryId>>,
	entries: Vec<Entry>,
	links: Vec<Option<EntryId>>,
}

impl Default for ChainedIndex {
	fn default() -> Self {
		Self::new()
	}
}

impl ChainedIndex {
	pub fn new() -> Self {
		Self {
			heads: vec![None; BUCKET_COUNT],
			entries: Vec::new(),
			links: Vec::new(),
		}
	}

	/// Records `suffix` after `prefix`.
	///
	/// All insertions for equal prefixes land in the same entry; the entry is
	/// created at the head of its chain on first sight.
	pub fn insert(&mut self, prefix: Prefix, suffix: Word, vocabulary: &Vocabulary) {
		let bucket = bucket_hash(&prefix, vocabulary);
		let id = match self.find(bucket, &prefix) {
			Some(id) => id,
			None => {
				let id = self.entries.len() as EntryId;
				self.entries.push(Entry::new(prefix));
				self.links.push(self.heads[bucket]);
				self.heads[bucket] = Some(id);
				id
			}
		};
		self.entries[id as usize].add_suffix(suffix);
	}

	/// Chained lookup; needs the vocabulary to hash the prefix.
	pub fn get(&self, prefix: &Prefix, vocabulary: &Vocabulary) -> Option<&Entry> {
		let id = self.find(bucket_hash(prefix, vocabulary), prefix)?;
		Some(&self.entries[id as usize])
	}

	/// Binds the index to its vocabulary for trait-based lookups.
	pub fn with_vocabulary<'a>(&'a self, vocabulary: &'a Vocabulary) -> ChainedView<'a> {
		ChainedView { index: self, vocabulary }
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Entry ids of a bucket, in chain order.
	pub(crate) fn chain(&self, bucket: usize) -> impl Iterator<Item = EntryId> + '_ {
		std::iter::successors(self.heads[bucket], move |id| self.links[*id as usize])
	}

	/// Hands the arena over, dropping the chains.
	pub(crate) fn into_entries(self) -> Vec<Entry> {
		self.entries
	}

	fn find(&self, bucket: usize, prefix: &Prefix) -> Option<EntryId> {
		self.chain(bucket).find(|id| self.entries[*id as usize].prefix() == prefix)
	}
}

/// A [`ChainedIndex`] paired with the vocabulary it was built with.
pub struct ChainedView<'a> {
	index: &'a ChainedIndex,
	vocabulary: &'a Vocabulary,
}

impl PrefixLookup for ChainedView<'_> {
	fn lookup(&self, prefix: &Prefix) -> Option<&Entry> {
		self.index.get(prefix, self.vocabulary)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn prefix(vocabulary: &mut Vocabulary, a: &str, b: &str) -> Prefix {
		Prefix::new([vocabulary.intern(a.as_bytes()), vocabulary.intern(b.as_bytes())])
	}

	#[test]
	fn separator_splits_fields() {
		let mut vocabulary = Vocabulary::new();
		let left = prefix(&mut vocabulary, "a", "bc");
		let right = prefix(&mut vocabulary, "ab", "c");

		assert_ne!(
			fold(&left, &vocabulary, 5381, 33),
			fold(&right, &vocabulary, 5381, 33)
		);
	}

	#[test]
	fn equal_prefixes_share_an_entry() {
		let mut vocabulary = Vocabulary::new();
		let key = prefix(&mut vocabulary, "the", "cat");
		let sat = vocabulary.intern(b"sat");
		let ran = vocabulary.intern(b"ran");

		let mut index = ChainedIndex::new();
		index.insert(key, sat, &vocabulary);
		index.insert(key, ran, &vocabulary);
		index.insert(key, sat, &vocabulary);

		assert_eq!(index.len(), 1);
		let entry = index.get(&key, &vocabulary).unwrap();
		assert_eq!(entry.suffixes().collect::<Vec<_>>(), vec![sat, ran, sat]);
	}

	#[test]
	fn absent_prefix_is_not_found() {
		let mut vocabulary = Vocabulary::new();
		let key = prefix(&mut vocabulary, "the", "cat");
		let other = prefix(&mut vocabulary, "cat", "the");

		let mut index = ChainedIndex::new();
		index.insert(key, Word::EndOfText, &vocabulary);

		assert!(index.get(&other, &vocabulary).is_none());
		assert!(index.with_vocabulary(&vocabulary).lookup(&key).is_some());
	}

	#[test]
	fn chain_lists_newest_first() {
		let mut vocabulary = Vocabulary::new();
		let mut index = ChainedIndex::new();
		let mut by_bucket: std::collections::HashMap<usize, Vec<EntryId>> = Default::default();

		for i in 0..5_000 {
			let key = prefix(&mut vocabulary, &format!("w{i}"), "x");
			index.insert(key, Word::EndOfText, &vocabulary);
			by_bucket.entry(bucket_hash(&key, &vocabulary)).or_default().push(i);
		}

		for (bucket, mut ids) in by_bucket {
			ids.reverse();
			assert_eq!(index.chain(bucket).collect::<Vec<_>>(), ids);
		}
	}
}
