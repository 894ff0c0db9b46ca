use std::path::{Path, PathBuf};
use std::{env, fs, io};

use log::warn;

/// Extracts the file name of a corpus path.
///
/// Examples:
/// - `"./texts/war.txt"` → `"war.txt"`
/// - `"war"` → `"war"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let name = input_path
		.as_ref()
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(name.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists the regular files of a directory, in directory-iteration order.
///
/// Entries are not followed: directories, symlinks and special files are
/// skipped. An entry that cannot be read, or whose type cannot be read, is
/// logged and skipped too.
/// Only an error on the directory itself is returned.
pub(crate) fn list_regular_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	Ok(fs::read_dir(dir)?.filter_map(regular_file).collect())
}

/// Path of a directory entry if it is a regular file.
fn regular_file(entry: io::Result<fs::DirEntry>) -> Option<PathBuf> {
	let entry = match entry {
		Ok(entry) => entry,
		Err(e) => {
			warn!("cannot read directory entry: {e}");
			return None;
		}
	};
	let path = entry.path();

	match entry.file_type() {
		Ok(file_type) if file_type.is_file() => Some(path),
		Ok(_) => None,
		Err(e) => {
			warn!("cannot stat {}: {e}", path.display());
			None
		}
	}
}
