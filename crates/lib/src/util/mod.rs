//! Shared utilities.
//!
//! Assignment parsing, atomic file writes and content hashing.

pub mod hash;

use std::fs;
use std::io;
use std::path::Path;

/// Split `key=value` on the first `=`, trimming both sides.
///
/// Returns `None` when there is no `=` or the key is empty.
pub fn split_assignment(assignment: &str) -> Option<(&str, &str)> {
  let (key, value) = assignment.split_once('=')?;
  let key = key.trim();
  if key.is_empty() {
    return None;
  }
  Some((key, value.trim()))
}

/// Write `content` to `path` through a sibling temp file and a rename,
/// so readers never observe a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let file_name = path
    .file_name()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
  let mut temp_name = file_name.to_os_string();
  temp_name.push(".tmp");
  let temp_path = path.with_file_name(temp_name);

  fs::write(&temp_path, content)?;
  fs::rename(&temp_path, path)
}
