//! Product version lookup.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;

/// Read the product version from the first line of `path`.
///
/// Only the trailing line terminator is removed; the rest of the line is used
/// verbatim.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, unreadable, or its first
/// line is empty.
pub fn resolve_version(path: &Path) -> Result<String, ConfigError> {
  let file = File::open(path).map_err(|source| match source.kind() {
    ErrorKind::NotFound => ConfigError::VersionFileMissing {
      path: path.to_path_buf(),
    },
    _ => ConfigError::VersionFileUnreadable {
      path: path.to_path_buf(),
      source,
    },
  })?;

  let mut line = String::new();
  BufReader::new(file)
    .read_line(&mut line)
    .map_err(|source| ConfigError::VersionFileUnreadable {
      path: path.to_path_buf(),
      source,
    })?;

  let version = line
    .strip_suffix('\n')
    .map(|l| l.strip_suffix('\r').unwrap_or(l))
    .unwrap_or(line.as_str());

  if version.is_empty() {
    return Err(ConfigError::VersionFileEmpty {
      path: path.to_path_buf(),
    });
  }

  debug!(path = %path.display(), version = %version, "resolved version");
  Ok(version.to_string())
}
