use std::io::{self, BufRead};

/// Longest token, in bytes. A longer run of non-blank bytes is cut here and
/// its remainder read as the next token.
pub const MAX_TOKEN_LEN: usize = 99;

/// Separators of the C locale: space, `\t`, `\n`, `\v`, `\f` and `\r`.
pub(crate) fn is_blank(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Whitespace-delimited tokens of a byte stream.
///
/// Tokens are raw bytes: no encoding is assumed.
pub struct Tokens<R> {
	reader: R,
	failed: bool,
}

impl<R: BufRead> Tokens<R> {
	pub fn new(reader: R) -> Self {
		Self { reader, failed: false }
	}

	fn read_token(&mut self) -> io::Result<Option<Vec<u8>>> {
		let mut token = Vec::new();

		loop {
			let buffer = match self.reader.fill_buf() {
				Ok(buffer) => buffer,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			};
			if buffer.is_empty() {
				break;
			}

			let mut used = 0;
			let mut done = false;
			for &byte in buffer {
				if is_blank(byte) {
					if !token.is_empty() {
						done = true;
						break;
					}
				} else {
					token.push(byte);
					if token.len() == MAX_TOKEN_LEN {
						used += 1;
						done = true;
						break;
					}
				}
				used += 1;
			}

			self.reader.consume(used);
			if done {
				break;
			}
		}

		Ok((!token.is_empty()).then_some(token))
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = io::Result<Vec<u8>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		match self.read_token() {
			Ok(token) => token.map(Ok),
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{BufReader, Cursor, Read};

	fn tokens(text: &[u8]) -> Vec<Vec<u8>> {
		Tokens::new(Cursor::new(text.to_vec())).collect::<io::Result<_>>().unwrap()
	}

	fn words(list: &[&str]) -> Vec<Vec<u8>> {
		list.iter().map(|w| w.as_bytes().to_vec()).collect()
	}

	#[test]
	fn splits_on_every_blank() {
		let got = tokens(b"  the cat\tsat\non\x0bthe\x0cmat\r\n");
		assert_eq!(got, words(&["the", "cat", "sat", "on", "the", "mat"]));
	}

	#[test]
	fn empty_and_blank_streams_have_no_token() {
		assert!(tokens(b"").is_empty());
		assert!(tokens(b" \n\t ").is_empty());
	}

	#[test]
	fn long_runs_are_cut() {
		let mut text = vec![b'x'; MAX_TOKEN_LEN * 2 + 5];
		text.extend_from_slice(b" end");

		let got = tokens(&text);
		assert_eq!(got.len(), 4);
		assert_eq!(got[0].len(), MAX_TOKEN_LEN);
		assert_eq!(got[1].len(), MAX_TOKEN_LEN);
		assert_eq!(got[2].len(), 5);
		assert_eq!(got[3], b"end");
	}

	#[test]
	fn tokens_span_buffer_boundaries() {
		let reader = BufReader::with_capacity(3, Cursor::new(b"alpha beta gamma".to_vec()));
		let got: Vec<Vec<u8>> = Tokens::new(reader).collect::<io::Result<_>>().unwrap();
		assert_eq!(got, words(&["alpha", "beta", "gamma"]));
	}

	#[test]
	fn non_utf8_bytes_are_kept() {
		// "привет" in windows-1251
		let got = tokens(b"\xef\xf0\xe8\xe2\xe5\xf2 ok");
		assert_eq!(got[0], b"\xef\xf0\xe8\xe2\xe5\xf2");
	}

	struct Broken;

	impl Read for Broken {
		fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::other("disk on fire"))
		}
	}

	#[test]
	fn read_error_is_reported_once() {
		let mut tokens = Tokens::new(BufReader::new(Broken));
		assert!(matches!(tokens.next(), Some(Err(_))));
		assert!(tokens.next().is_none());
	}
}
