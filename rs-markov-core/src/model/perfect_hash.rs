//! Perfect hash re-indexing of a [`ChainedIndex`].
//!
//! Each bucket of the chained table gets its own small table, sized
//! `OVERALLOCATION` times its number of entries, and a multiplier found by
//! trial so that no two entries of the bucket land in the same slot. Lookups
//! then hash twice (bucket, then slot) and never walk a chain.

use log::{debug, error};

use super::entry::Entry;
use super::prefix_index::{bucket_hash, slot_hash, ChainedIndex, EntryId, PrefixLookup, BUCKET_COUNT};
use super::word::{Prefix, Vocabulary};
use crate::error::{MarkovError, Result};

/// Slots allocated per entry of a bucket.
pub const OVERALLOCATION: usize = 10;

/// Multipliers `1..MAX_MULTIPLIER` are tried before giving up on a bucket.
pub const MAX_MULTIPLIER: u64 = 10_000;

/// Collision-free table of one bucket.
#[derive(Debug)]
pub struct BucketTable {
	multiplier: u64,
	slots: Box<[Option<EntryId>]>,
}

impl BucketTable {
	/// Searches a multiplier placing every `ids` entry in a distinct slot.
	///
	/// `ids` must not be empty.
	fn build(bucket: usize, ids: &[EntryId], entries: &[Entry], vocabulary: &Vocabulary) -> Result<Self> {
		let slot_count = ids.len() * OVERALLOCATION;
		let mut slots: Box<[Option<EntryId>]> = vec![None; slot_count].into_boxed_slice();

		for multiplier in 1..MAX_MULTIPLIER {
			let placed = ids.iter().all(|id| {
				let slot = slot_hash(entries[*id as usize].prefix(), vocabulary, multiplier, slot_count);
				if slots[slot].is_some() {
					return false;
				}
				slots[slot] = Some(*id);
				true
			});

			if placed {
				return Ok(Self { multiplier, slots });
			}
			slots.fill(None);
		}

		error!("cannot build perfect hash table for bucket {bucket}");
		for id in ids {
			let words = entries[*id as usize].prefix().words();
			let shown: Vec<String> = words
				.iter()
				.map(|w| String::from_utf8_lossy(vocabulary.bytes(*w)).into_owned())
				.collect();
			error!("'{}'", shown.join(" "));
		}

		Err(MarkovError::PerfectHashExhausted {
			bucket,
			entries: ids.len(),
			slots: slot_count,
		})
	}

	pub fn multiplier(&self) -> u64 {
		self.multiplier
	}

	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}
}

/// Prefix index where every lookup is two hashes and one comparison.
///
/// # Invariants
/// - For every prefix of the source [`ChainedIndex`], `lookup` returns the
///   entry the chained lookup returned
/// - Within a bucket table, each entry owns a distinct slot
/// - Empty buckets have no table
#[derive(Debug)]
pub struct PerfectIndex {
	buckets: Vec<Option<BucketTable>>,
	entries: Vec<Entry>,
	vocabulary: Vocabulary,
}

impl PerfectIndex {
	/// Re-indexes every bucket of `chained`.
	///
	/// # Errors
	/// [`MarkovError::PerfectHashExhausted`] if a bucket has no collision-free
	/// multiplier below [`MAX_MULTIPLIER`].
	pub fn build(chained: ChainedIndex, vocabulary: Vocabulary) -> Result<Self> {
		let mut buckets = Vec::with_capacity(BUCKET_COUNT);
		let mut worst: u64 = 0;

		for bucket in 0..BUCKET_COUNT {
			let ids: Vec<EntryId> = chained.chain(bucket).collect();
			if ids.is_empty() {
				buckets.push(None);
				continue;
			}
			let table = BucketTable::build(bucket, &ids, chained.entries(), &vocabulary)?;
			worst = worst.max(table.multiplier);
			buckets.push(Some(table));
		}

		debug!(
			"perfect hash built: {} entries, {} buckets used, largest multiplier {worst}",
			chained.len(),
			buckets.iter().filter(|b| b.is_some()).count()
		);

		Ok(Self {
			buckets,
			entries: chained.into_entries(),
			vocabulary,
		})
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
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

	/// Table of a bucket, `None` for an empty bucket.
	pub fn bucket(&self, bucket: usize) -> Option<&BucketTable> {
		self.buckets.get(bucket)?.as_ref()
	}
}

impl PrefixLookup for PerfectIndex {
	fn lookup(&self, prefix: &Prefix) -> Option<&Entry> {
		let table = self.bucket(bucket_hash(prefix, &self.vocabulary))?;
		let slot = slot_hash(prefix, &self.vocabulary, table.multiplier, table.slots.len());
		let entry = &self.entries[table.slots[slot]? as usize];
		(entry.prefix() == prefix).then_some(entry)
	}
}
