use log::error;

use super::corpus::CorpusIndex;
use super::link_config::LinkConfig;
use super::prefix_index::PrefixLookup;
use super::random::{Lcg, RandomSource, RAND_MAX};
use super::registry::CorpusRegistry;
use super::word::{Prefix, Word};

/// A new paragraph starts when a draw falls below this bound.
const PARAGRAPH_BOUND: u32 = RAND_MAX / 50;

/// A line break follows a word when a draw falls below this bound.
const LINE_BREAK_BOUND: u32 = RAND_MAX / 3;

/// Generates the markup fragment of corpus `corpus_selector` for `seed`.
///
/// The corpus is `registry.select(corpus_selector)`, so any selector is valid.
/// The same arguments always produce the same bytes.
pub fn generate(
	registry: &CorpusRegistry,
	corpus_selector: u32,
	seed: u32,
	word_count: usize,
	links: &LinkConfig,
) -> Vec<u8> {
	let mut out = Vec::new();
	write_fragment(registry.select(corpus_selector), &mut Lcg::new(seed), word_count, links, &mut out);
	out
}

/// Random walk over a corpus, appending markup to `out`.
///
/// # Behavior
/// Starting from the `EndOfText` prefix, at most `word_count` times:
/// - look up the current prefix (a missing prefix is logged and ends the walk)
/// - pick a suffix by reservoir sampling; `EndOfText` ends the walk
/// - draw the internal link, external link and paragraph decisions
/// - emit the word, plain or wrapped in a link, then maybe a line break
/// - slide the prefix
///
/// An open paragraph is closed at the end.
///
/// # Notes
/// - Draws are consumed in a fixed order; changing it changes every page.
/// - Words are copied as raw corpus bytes.
pub fn write_fragment<R: RandomSource + ?Sized>(
	corpus: &CorpusIndex,
	source: &mut R,
	word_count: usize,
	links: &LinkConfig,
	out: &mut Vec<u8>,
) {
	let intern_bound = links.intern_draw_bound();
	let extern_bound = links.extern_draw_bound();
	let links_total = links.links_total.max(1);
	let extern_servers = links.extern_servers.max(1);

	let mut prefix = Prefix::start();
	let mut paragraph_open = false;

	for _ in 0..word_count {
		let Some(entry) = corpus.lookup(&prefix) else {
			error!("{}: prefix {:?} missing from the index", corpus.name(), prefix);
			break;
		};

		let word = match entry.choose(source) {
			Some(Word::EndOfText) => break,
			Some(word) => word,
			None => {
				error!("{}: prefix {:?} has no suffix", corpus.name(), prefix);
				break;
			}
		};
		let text = corpus.vocabulary().bytes(word);

		let intern_link = (source.next_draw() as u64) < intern_bound;
		let extern_link = (source.next_draw() as u64) < extern_bound;

		if source.next_draw() < PARAGRAPH_BOUND {
			if paragraph_open {
				out.extend_from_slice(b"</p>\n");
			}
			out.extend_from_slice(b"<p>\n");
			paragraph_open = true;
		}

		if intern_link {
			let page = source.next_draw() % links_total;
			out.extend_from_slice(format!("<a href=\"/{page}.html\">").as_bytes());
			out.extend_from_slice(text);
			out.extend_from_slice(b"</a> ");
		} else if extern_link {
			// Page number first, then server.
			let page = source.next_draw() % links_total;
			let server = source.next_draw() % extern_servers;
			out.extend_from_slice(
				format!(
					"<a href=\"http://{}{server}{}/{page}.html\">",
					links.extern_prefix, links.extern_suffix
				)
				.as_bytes(),
			);
			out.extend_from_slice(text);
			out.extend_from_slice(b"</a> ");
		} else {
			out.extend_from_slice(text);
			out.push(b' ');
		}

		if source.next_draw() < LINE_BREAK_BOUND {
			out.push(b'\n');
		}

		prefix = prefix.shifted(word);
	}

	if paragraph_open {
		out.extend_from_slice(b"</p>\n");
	}
}
