use super::generator::write_fragment;
use super::link_config::LinkConfig;
use super::random::{Lcg, RandomSource};
use super::registry::CorpusRegistry;

/// Seed of a page path such as `/1234.html`.
///
/// Reads the decimal digits right after the leading `/`; whatever follows is
/// ignored. Returns `None` when there is no digit or the number does not fit
/// a `u32`, in which case the caller picks a fresh seed.
pub fn parse_seed(path: &str) -> Option<u32> {
	let rest = path.strip_prefix('/')?;
	let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
	rest[..end].parse().ok()
}

/// Renders the complete HTML document of page `seed`.
///
/// # Behavior
/// From a generator seeded with `seed`:
/// - the first draw gives the word count, `draw % words_per_page`
/// - the second draw selects the corpus
/// - the remaining draws drive the fragment
///
/// The title is the generator state after the word-count draw.
pub fn render_page(registry: &CorpusRegistry, seed: u32, words_per_page: u32, links: &LinkConfig) -> Vec<u8> {
	let mut source = Lcg::new(seed);
	let word_count = source.next_draw() % words_per_page.max(1);
	let title = source.seed();
	let corpus = registry.select(source.next_draw());

	let mut out = Vec::with_capacity(word_count as usize * 10);
	out.extend_from_slice(format!("<html><head></head><body>\n<title>{title}</title>\n").as_bytes());
	write_fragment(corpus, &mut source, word_count as usize, links, &mut out);
	out.extend_from_slice(b"</body></html>\n");
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::corpus::CorpusIndex;
	use std::io::Cursor;

	fn registry(texts: &[&str]) -> CorpusRegistry {
		let corpora = texts
			.iter()
			.enumerate()
			.map(|(i, text)| CorpusIndex::from_reader(&i.to_string(), Cursor::new(text.as_bytes().to_vec())).unwrap())
			.collect();
		CorpusRegistry::from_corpora(corpora).unwrap()
	}

	#[test]
	fn seeds_are_read_from_paths() {
		assert_eq!(parse_seed("/1234.html"), Some(1234));
		assert_eq!(parse_seed("/0.html"), Some(0));
		assert_eq!(parse_seed("/42"), Some(42));
		assert_eq!(parse_seed("/7abc"), Some(7));
		assert_eq!(parse_seed("/4294967295.html"), Some(u32::MAX));
	}

	#[test]
	fn bad_paths_have_no_seed() {
		assert_eq!(parse_seed("/"), None);
		assert_eq!(parse_seed("/index.html"), None);
		assert_eq!(parse_seed("1234.html"), None);
		assert_eq!(parse_seed("/4294967296.html"), None);
		assert_eq!(parse_seed("/-1.html"), None);
	}

	#[test]
	fn page_has_a_shell() {
		let registry = registry(&["the cat sat"]);
		let page = String::from_utf8(render_page(&registry, 99, 1000, &LinkConfig::default())).unwrap();

		// 99 * 1103515245 + 12345 mod 2^32
		assert!(page.starts_with("<html><head></head><body>\n<title>1873839200</title>\n"));
		assert!(page.ends_with("</body></html>\n"));
	}

	#[test]
	fn page_is_deterministic() {
		let registry = registry(&["one two three two one", "four five six five four"]);
		let links = LinkConfig::default();
		for seed in [0, 1, 31_337] {
			assert_eq!(
				render_page(&registry, seed, 50, &links),
				render_page(&registry, seed, 50, &links)
			);
		}
	}

	#[test]
	fn zero_words_per_page_is_an_empty_body() {
		let registry = registry(&["the cat sat"]);
		let page = render_page(&registry, 5, 0, &LinkConfig::default());
		assert_eq!(page, b"<html><head></head><body>\n<title>1222621274</title>\n</body></html>\n");
	}
}
