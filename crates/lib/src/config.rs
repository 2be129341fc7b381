//! Release configuration.
//!
//! All paths and names the pipeline touches live in [`ReleaseConfig`], derived
//! from a project root with a fixed layout. The differences between release
//! flavours (collision handling, checksum files) are plain fields rather than
//! separate code paths.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::{
  BUILD_DIR, PACKAGES_DIR, PRODUCT_NAME, PROJECT_DIR, ROOT_ENV, TOOLCHAIN_OUTPUT_NAME, VERSION_FILE,
};
use crate::error::ConfigError;

/// What to do when the package about to be written already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
  /// Abort with a packaging error and leave the existing file untouched.
  #[default]
  Fail,
  /// Replace the existing file.
  Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
  pub root: PathBuf,
  pub version_file: PathBuf,
  pub project_dir: PathBuf,
  pub build_dir: PathBuf,
  pub packages_dir: PathBuf,
  /// Canonical binary name, also the package name prefix.
  pub product: String,
  /// Name the toolchain gives its output.
  pub toolchain_output: String,
  pub collision: CollisionPolicy,
  /// Write a `<package>.sha256` file next to the package.
  pub checksum: bool,
}

impl ReleaseConfig {
  /// Default layout below `root`, used as given.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    Self {
      version_file: root.join(VERSION_FILE),
      project_dir: root.join(PROJECT_DIR),
      build_dir: root.join(BUILD_DIR),
      packages_dir: root.join(PACKAGES_DIR),
      product: PRODUCT_NAME.to_string(),
      toolchain_output: TOOLCHAIN_OUTPUT_NAME.to_string(),
      collision: CollisionPolicy::default(),
      checksum: false,
      root,
    }
  }

  /// Default layout below the canonicalized `root`, so every derived path is absolute.
  pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
    let root = dunce::canonicalize(root).map_err(|source| ConfigError::InvalidRoot {
      path: root.to_path_buf(),
      source,
    })?;
    Ok(Self::new(root))
  }

  pub fn with_collision_policy(mut self, collision: CollisionPolicy) -> Self {
    self.collision = collision;
    self
  }

  pub fn with_checksum(mut self, checksum: bool) -> Self {
    self.checksum = checksum;
    self
  }
}

/// Resolve the project root.
///
/// Precedence: `explicit`, then `FXRELEASE_ROOT`, then the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }

  if let Some(path) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
    return Ok(PathBuf::from(path));
  }

  std::env::current_dir().map_err(|source| ConfigError::InvalidRoot {
    path: PathBuf::from("."),
    source,
  })
}
