use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::entry::Entry;
use super::perfect_hash::PerfectIndex;
use super::prefix_index::{ChainedIndex, PrefixLookup};
use super::tokenizer::{is_blank, Tokens};
use super::word::{Prefix, Vocabulary, Word};
use crate::error::{MarkovError, Result};
use crate::io::get_filename;

/// Folds a token stream into a chained prefix index.
///
/// The prefix starts as `EndOfText` only and slides by one word per token.
/// [`finish`](CorpusBuilder::finish) records `EndOfText` after the last
/// prefix, so generation can stop where the text stopped.
#[derive(Debug)]
pub struct CorpusBuilder {
	vocabulary: Vocabulary,
	index: ChainedIndex,
	prefix: Prefix,
}

impl Default for CorpusBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl CorpusBuilder {
	pub fn new() -> Self {
		Self {
			vocabulary: Vocabulary::new(),
			index: ChainedIndex::new(),
			prefix: Prefix::start(),
		}
	}

	/// Adds one token after the current prefix.
	///
	/// # Errors
	/// [`MarkovError::InvalidToken`] if `token` is empty or holds a blank byte.
	/// Such a token would hash like the end of text.
	pub fn add(&mut self, token: &[u8]) -> Result<()> {
		if token.is_empty() || token.iter().any(|b| is_blank(*b)) {
			return Err(MarkovError::InvalidToken(String::from_utf8_lossy(token).into_owned()));
		}
		self.push_token(token);
		Ok(())
	}

	/// Adds every token of `reader`.
	///
	/// # Errors
	/// Returns the first read error of the stream.
	pub fn feed<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
		for token in Tokens::new(reader) {
			self.push_token(&token?);
		}
		Ok(())
	}

	/// Marks the end of text and hands over the built index.
	pub fn finish(mut self) -> (Vocabulary, ChainedIndex) {
		self.push(Word::EndOfText);
		self.vocabulary.freeze();
		(self.vocabulary, self.index)
	}

	fn push_token(&mut self, token: &[u8]) {
		let word = self.vocabulary.intern(token);
		self.push(word);
	}

	fn push(&mut self, word: Word) {
		self.index.insert(self.prefix, word, &self.vocabulary);
		self.prefix = self.prefix.shifted(word);
	}
}

/// The model of one corpus file.
///
/// Immutable once built: every lookup goes through the perfect hash tables.
#[derive(Debug)]
pub struct CorpusIndex {
	name: String,
	index: PerfectIndex,
}

impl CorpusIndex {
	/// Builds the model of a text stream.
	///
	/// # Errors
	/// - [`MarkovError::Io`] if the stream cannot be read
	/// - [`MarkovError::PerfectHashExhausted`] if a bucket cannot be re-indexed
	pub fn from_reader<R: BufRead>(name: &str, reader: R) -> Result<Self> {
		let mut builder = CorpusBuilder::new();
		builder.feed(reader)?;
		Self::from_builder(name, builder)
	}

	/// Builds the model of a corpus file. The file name becomes the corpus name.
	///
	/// # Errors
	/// - [`MarkovError::CorpusFile`] if the file cannot be opened or read
	/// - [`MarkovError::PerfectHashExhausted`] if a bucket cannot be re-indexed
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let corpus_error = |source| MarkovError::CorpusFile { path: path.to_path_buf(), source };

		let name = get_filename(path).map_err(corpus_error)?;
		let file = File::open(path).map_err(corpus_error)?;

		let mut builder = CorpusBuilder::new();
		builder.feed(BufReader::new(file)).map_err(corpus_error)?;
		Self::from_builder(&name, builder)
	}

	fn from_builder(name: &str, builder: CorpusBuilder) -> Result<Self> {
		let (vocabulary, chained) = builder.finish();
		debug!("{name}: {} words, {} prefixes", vocabulary.len(), chained.len());
		Ok(Self {
			name: name.to_owned(),
			index: PerfectIndex::build(chained, vocabulary)?,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		self.index.vocabulary()
	}

	pub fn index(&self) -> &PerfectIndex {
		&self.index
	}
}

impl PrefixLookup for CorpusIndex {
	fn lookup(&self, prefix: &Prefix) -> Option<&Entry> {
		self.index.lookup(prefix)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn corpus(text: &str) -> CorpusIndex {
		CorpusIndex::from_reader("test", Cursor::new(text.as_bytes().to_vec())).unwrap()
	}

	#[test]
	fn builder_links_consecutive_words() {
		let mut builder = CorpusBuilder::new();
		builder.feed(Cursor::new(b"the cat sat".to_vec())).unwrap();
		let (vocabulary, chained) = builder.finish();
		let view = chained.with_vocabulary(&vocabulary);

		let start = view.lookup(&Prefix::start()).unwrap();
		assert_eq!(start.len(), 1);
		let the = start.suffixes().next().unwrap();
		assert_eq!(vocabulary.bytes(the), b"the");
		assert_eq!(chained.len(), 4);
	}

	#[test]
	fn last_prefix_ends_the_text() {
		let index = corpus("the cat sat");
		let words = index.vocabulary();

		let tail = index
			.index()
			.entries()
			.iter()
			.find(|e| e.prefix().words().map(|w| words.bytes(w).to_vec()) == [b"cat".to_vec(), b"sat".to_vec()])
			.unwrap();
		assert_eq!(tail.suffixes().collect::<Vec<_>>(), vec![Word::EndOfText]);
	}

	#[test]
	fn repeated_suffixes_are_kept() {
		let index = corpus("a b a b a b");
		let mut sizes: Vec<usize> = index.index().entries().iter().map(|e| e.len()).collect();
		sizes.sort();
		// (EOT, EOT) -> a, (EOT, a) -> b, (b, a) -> b b, (a, b) -> a a EOT
		assert_eq!(sizes, vec![1, 1, 2, 3]);
	}

	#[test]
	fn empty_text_has_a_single_entry() {
		let index = corpus("");
		assert_eq!(index.index().len(), 1);
		let start = index.lookup(&Prefix::start()).unwrap();
		assert_eq!(start.suffixes().collect::<Vec<_>>(), vec![Word::EndOfText]);
	}

	#[test]
	fn blank_tokens_are_rejected() {
		let mut builder = CorpusBuilder::new();
		let tokens: [&[u8]; 4] = [b"\n", b"", b"two words", b"tab\t"];
		for token in tokens {
			assert!(matches!(builder.add(token), Err(MarkovError::InvalidToken(_))));
		}
		builder.add(b"x").unwrap();

		let (vocabulary, chained) = builder.finish();
		assert_eq!(vocabulary.len(), 1);
		assert_eq!(chained.len(), 2);
		assert!(PerfectIndex::build(chained, vocabulary).is_ok());
	}

	#[test]
	fn missing_file_is_a_corpus_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = CorpusIndex::from_file(dir.path().join("absent.txt")).unwrap_err();
		assert!(matches!(err, MarkovError::CorpusFile { .. }));
	}

	#[test]
	fn file_name_names_the_corpus() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("war.txt");
		std::fs::write(&path, "war and peace").unwrap();

		let index = CorpusIndex::from_file(&path).unwrap();
		assert_eq!(index.name(), "war.txt");
		assert_eq!(index.vocabulary().len(), 3);
	}
}
