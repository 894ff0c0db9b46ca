use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use log::{info, warn};
use rs_markov_core::model::link_config::LinkConfig;

/// Section of the ini file read by the daemon.
const SECTION: &str = "generator";

/// Command line of the daemon.
#[derive(Debug, Clone, Parser)]
#[command(name = "rs-markov-server")]
#[command(about = "Serves synthetic HTML pages generated from a text corpus")]
pub struct Cli {
	/// Ini file with a [generator] section
	#[arg(short, long, default_value = "gen.ini")]
	pub config: PathBuf,

	/// Folder of corpus files, one model per regular file
	#[arg(short, long, default_value = "./texts/")]
	pub texts: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info")]
	pub log_level: String,
}

/// Sections of an ini file, each a map of keys to raw values.
///
/// - `[name]` opens a section
/// - lines starting with `#` or `;` are comments
/// - otherwise the first two words split on blanks and `=` are key and value
/// - lines before the first section are ignored
#[derive(Debug, Default)]
pub struct IniDocument {
	sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
	pub fn parse(text: &str) -> Self {
		let mut document = Self::default();
		let mut current: Option<String> = None;

		for line in text.lines() {
			let line = line.trim_start();
			if let Some(header) = line.strip_prefix('[') {
				if let Some((name, _)) = header.split_once(']') {
					let name = name.trim().to_owned();
					document.sections.entry(name.clone()).or_default();
					current = Some(name);
				}
				continue;
			}
			if line.starts_with('#') || line.starts_with(';') {
				continue;
			}
			let Some(section) = &current else { continue };

			let mut words = line.split([' ', '=', '\t']).filter(|w| !w.is_empty());
			if let (Some(key), Some(value)) = (words.next(), words.next()) {
				if let Some(values) = document.sections.get_mut(section) {
					values.insert(key.to_owned(), value.to_owned());
				}
			}
		}

		document
	}

	pub fn get(&self, section: &str, key: &str) -> Option<&str> {
		self.sections.get(section)?.get(key).map(String::as_str)
	}
}

/// Daemon settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
	pub daemon_port: u16,
	/// Upper bound of the word count of a page.
	pub words_per_page: u32,
	pub links_total: u32,
	/// `0` or less: a single worker.
	pub worker_threads: i64,
	pub extern_links_prefix: String,
	pub extern_links_suffix: String,
	pub extern_links_servers: u32,
	pub intern_links_probability: f64,
	pub extern_links_probability: f64,
	/// Charset announced in `Content-Type`, the encoding of the corpus files.
	pub charset: String,
}

impl Default for GenConfig {
	fn default() -> Self {
		Self {
			daemon_port: 8083,
			words_per_page: 1000,
			links_total: 100_000,
			worker_threads: 1,
			extern_links_prefix: "serv".to_owned(),
			extern_links_suffix: ".testbed.local".to_owned(),
			extern_links_servers: 1,
			intern_links_probability: 0.1,
			extern_links_probability: 0.0,
			charset: "windows-1251".to_owned(),
		}
	}
}

impl GenConfig {
	/// Loads `path` over the defaults.
	///
	/// A missing file is not an error: the defaults are used.
	pub fn load<P: AsRef<Path>>(path: P) -> Self {
		let path = path.as_ref();
		let config = match std::fs::read_to_string(path) {
			Ok(text) => {
				info!("loading values from {}", path.display());
				Self::from_ini(&IniDocument::parse(&text))
			}
			Err(e) => {
				warn!("cannot open {}: {e}", path.display());
				Self::default().clamped()
			}
		};
		config.log();
		config
	}

	/// Reads the `[generator]` section over the defaults, then clamps.
	pub fn from_ini(document: &IniDocument) -> Self {
		let mut config = Self::default();

		try_set(document, "daemon_port", &mut config.daemon_port);
		try_set(document, "words_per_page", &mut config.words_per_page);
		try_set(document, "links_total", &mut config.links_total);
		try_set(document, "worker_threads", &mut config.worker_threads);
		try_set(document, "extern_links_prefix", &mut config.extern_links_prefix);
		try_set(document, "extern_links_suffix", &mut config.extern_links_suffix);
		try_set(document, "extern_links_servers", &mut config.extern_links_servers);
		try_set(document, "intern_links_probability", &mut config.intern_links_probability);
		try_set(document, "extern_links_probability", &mut config.extern_links_probability);
		try_set(document, "charset", &mut config.charset);

		config.clamped()
	}

	/// Internal probability outside `(0, 1)` becomes 0.1, external probability
	/// outside `[0, 1)` becomes 0.01.
	fn clamped(mut self) -> Self {
		if !(self.intern_links_probability > 0.0 && self.intern_links_probability < 1.0) {
			self.intern_links_probability = 0.1;
		}
		if !(self.extern_links_probability >= 0.0 && self.extern_links_probability < 1.0) {
			self.extern_links_probability = 0.01;
		}
		self
	}

	/// Number of HTTP workers, at least one.
	pub fn workers(&self) -> usize {
		if self.worker_threads <= 0 {
			1
		} else {
			self.worker_threads as usize
		}
	}

	pub fn content_type(&self) -> String {
		format!("text/html; charset={}", self.charset)
	}

	/// Link parameters handed to the generator.
	pub fn link_config(&self) -> LinkConfig {
		let mut links = LinkConfig::default();
		links.links_total = self.links_total;
		links.extern_prefix = self.extern_links_prefix.clone();
		links.extern_suffix = self.extern_links_suffix.clone();
		links.extern_servers = self.extern_links_servers;
		// Both values were clamped into [0, 1).
		if let Err(e) = links.set_intern_link_threshold(self.intern_links_probability) {
			warn!("{e}");
		}
		if let Err(e) = links.set_extern_link_threshold(self.extern_links_probability) {
			warn!("{e}");
		}
		links
	}

	fn log(&self) {
		info!("daemon_port {}", self.daemon_port);
		info!("words_per_page {}", self.words_per_page);
		info!("intern probability {}", self.intern_links_probability);
		info!("extern probability {}", self.extern_links_probability);
		info!("extern links prefix {}", self.extern_links_prefix);
		info!("extern links suffix {}", self.extern_links_suffix);
		info!("extern links servers {}", self.extern_links_servers);
		info!("links_total {}", self.links_total);
		info!("worker_threads {}", self.worker_threads);
		info!("charset {}", self.charset);
	}
}

/// Overwrites `target` with the parsed value of `key`, if present and valid.
fn try_set<T>(document: &IniDocument, key: &str, target: &mut T)
where
	T: FromStr,
	T::Err: Display,
{
	let Some(raw) = document.get(SECTION, key) else { return };
	match raw.parse() {
		Ok(value) => *target = value,
		Err(e) => warn!("ignoring {key} = {raw}: {e}"),
	}
}
