use super::random::RandomSource;
use super::word::{Prefix, Word};

/// Represents a state of the Markov chain.
///
/// An `Entry` corresponds to a fixed prefix of `PREFIX_LEN` words and stores
/// every word observed right after it in the corpus.
///
/// ## Invariants
/// - Suffixes are a multiset: a word seen three times is stored three times,
///   so sampling is proportional to the number of occurrences.
/// - An entry created by a corpus build holds at least one suffix.
#[derive(Clone, Debug)]
pub struct Entry {
	prefix: Prefix,
	/// Kept in insertion order, read back most recent first.
	suffixes: Vec<Word>,
}

impl Entry {
	/// Creates a new empty entry for the given prefix.
	pub fn new(prefix: Prefix) -> Self {
		Self { prefix, suffixes: Vec::new() }
	}

	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}

	/// Records one more occurrence of `suffix` after this prefix.
	pub fn add_suffix(&mut self, suffix: Word) {
		self.suffixes.push(suffix);
	}

	/// Suffixes, most recently added first.
	pub fn suffixes(&self) -> impl Iterator<Item = Word> + '_ {
		self.suffixes.iter().rev().copied()
	}

	/// Number of stored suffix occurrences.
	pub fn len(&self) -> usize {
		self.suffixes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.suffixes.is_empty()
	}

	/// Picks a suffix uniformly among the stored occurrences.
	///
	/// Reservoir sampling in a single pass: the `k`-th suffix replaces the
	/// current choice when `draw % k == 0`, i.e. with probability `1/k`.
	/// One draw is consumed per stored suffix.
	///
	/// Returns `None` if the entry has no suffix.
	pub fn choose<R: RandomSource + ?Sized>(&self, source: &mut R) -> Option<Word> {
		let mut choice = None;
		let mut seen: u32 = 0;
		for suffix in self.suffixes() {
			seen += 1;
			if source.next_draw() % seen == 0 {
				choice = Some(suffix);
			}
		}
		choice
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::random::Lcg;
	use crate::model::word::Vocabulary;

	#[test]
	fn suffixes_are_read_most_recent_first() {
		let mut vocabulary = Vocabulary::new();
		let a = vocabulary.intern(b"a");
		let b = vocabulary.intern(b"b");

		let mut entry = Entry::new(Prefix::start());
		entry.add_suffix(a);
		entry.add_suffix(b);
		entry.add_suffix(a);

		assert_eq!(entry.suffixes().collect::<Vec<_>>(), vec![a, b, a]);
		assert_eq!(entry.len(), 3);
	}

	#[test]
	fn single_suffix_is_always_chosen() {
		let mut vocabulary = Vocabulary::new();
		let only = vocabulary.intern(b"only");

		let mut entry = Entry::new(Prefix::start());
		entry.add_suffix(only);

		for seed in 0..100 {
			assert_eq!(entry.choose(&mut Lcg::new(seed)), Some(only));
		}
	}

	#[test]
	fn choose_consumes_one_draw_per_suffix() {
		let mut vocabulary = Vocabulary::new();
		let mut entry = Entry::new(Prefix::start());
		for word in [&b"x"[..], b"y", b"z"] {
			entry.add_suffix(vocabulary.intern(word));
		}

		let mut source = Lcg::new(7);
		entry.choose(&mut source);

		let mut expected = Lcg::new(7);
		for _ in 0..3 {
			expected.next_draw();
		}
		assert_eq!(source.seed(), expected.seed());
	}

	#[test]
	fn empty_entry_has_no_choice() {
		let entry = Entry::new(Prefix::start());
		assert!(entry.is_empty());
		assert_eq!(entry.choose(&mut Lcg::new(1)), None);
	}
}
