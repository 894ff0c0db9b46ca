use std::collections::HashMap;

/// Number of words in a prefix (order of the Markov chain minus one).
pub const PREFIX_LEN: usize = 2;

/// Bytes hashed for [`Word::EndOfText`].
///
/// Whitespace never survives tokenization, so no literal word has these bytes.
const END_OF_TEXT_BYTES: &[u8] = b"\n";

/// Index of an interned token inside a [`Vocabulary`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

/// A token of the model.
///
/// `EndOfText` is both the filler of the initial prefix and the suffix that
/// marks the end of a corpus. It is compared by tag, so a corpus word can
/// never be mistaken for it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Word {
	Literal(Symbol),
	EndOfText,
}

/// Interner owning the bytes of every distinct token of a corpus.
///
/// Two tokens get the same [`Symbol`] iff their bytes are equal.
#[derive(Debug, Default)]
pub struct Vocabulary {
	texts: Vec<Box<[u8]>>,
	symbols: HashMap<Box<[u8]>, Symbol>,
}

impl Vocabulary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the word for `bytes`, interning them on first sight.
	pub fn intern(&mut self, bytes: &[u8]) -> Word {
		if let Some(symbol) = self.symbols.get(bytes) {
			return Word::Literal(*symbol);
		}

		let symbol = Symbol(self.texts.len() as u32);
		self.texts.push(bytes.into());
		self.symbols.insert(bytes.into(), symbol);
		Word::Literal(symbol)
	}

	/// Bytes of a word. `EndOfText` yields the hashing placeholder `"\n"`.
	pub fn bytes(&self, word: Word) -> &[u8] {
		match word {
			Word::Literal(Symbol(id)) => &self.texts[id as usize],
			Word::EndOfText => END_OF_TEXT_BYTES,
		}
	}

	/// Number of distinct literal words.
	pub fn len(&self) -> usize {
		self.texts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.texts.is_empty()
	}

	/// Drops the reverse lookup map once no more words will be interned.
	pub(crate) fn freeze(&mut self) {
		self.symbols = HashMap::new();
	}
}

/// The `PREFIX_LEN` words preceding a suffix: the state of the chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Prefix([Word; PREFIX_LEN]);

impl Prefix {
	/// The prefix of the beginning of a text: only `EndOfText`.
	pub fn start() -> Self {
		Self([Word::EndOfText; PREFIX_LEN])
	}

	pub fn new(words: [Word; PREFIX_LEN]) -> Self {
		Self(words)
	}

	pub fn words(&self) -> &[Word; PREFIX_LEN] {
		&self.0
	}

	/// Drops the oldest word and appends `word`.
	pub fn shifted(&self, word: Word) -> Self {
		let mut words = self.0;
		words.rotate_left(1);
		words[PREFIX_LEN - 1] = word;
		Self(words)
	}
}
