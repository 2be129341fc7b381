//! Error taxonomy for the release pipeline.
//!
//! Every error is terminal: the pipeline never retries or recovers locally.
//! Each stage reports through its own enum and [`ReleaseError`] ties them
//! together for the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SmokeTest;

/// How a child process ended, for diagnostics.
fn exit_status(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {code}"),
    None => "termination by signal".to_string(),
  }
}

/// Invalid invocation, environment or project metadata.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("unsupported architecture: {0} (expected one of: amd64, arm64)")]
  UnsupportedArch(String),

  #[error("unsupported host platform: {0} (expected one of: linux, darwin, windows)")]
  UnsupportedPlatform(String),

  #[error("version file not found: {}", path.display())]
  VersionFileMissing { path: PathBuf },

  #[error("failed to read version file {}: {source}", path.display())]
  VersionFileUnreadable { path: PathBuf, source: std::io::Error },

  #[error("version file is empty: {}", path.display())]
  VersionFileEmpty { path: PathBuf },

  #[error("invalid project root {}: {source}", path.display())]
  InvalidRoot { path: PathBuf, source: std::io::Error },

  #[error("build toolchain `{program}` not found: {message}")]
  ToolchainNotFound { program: String, message: String },
}

/// The build toolchain could not produce a usable binary.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to run `{command}`: {source}")]
  Spawn { command: String, source: std::io::Error },

  #[error("`{command}` failed with {}: {stderr}", exit_status(code))]
  Failed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("toolchain reported success but produced no binary at {}", path.display())]
  MissingOutput { path: PathBuf },

  #[error("failed to move {} to {}: {source}", from.display(), to.display())]
  Relocate {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },
}

/// A smoke test rejected the built binary.
#[derive(Debug, Error)]
pub enum VerificationError {
  #[error("{test} check could not run {}: {source}", binary.display())]
  Spawn {
    test: SmokeTest,
    binary: PathBuf,
    source: std::io::Error,
  },

  #[error("binary {} failed on valid input with {}: {stderr}", binary.display(), exit_status(code))]
  FormatFailed {
    binary: PathBuf,
    code: Option<i32>,
    stderr: String,
  },

  #[error("binary {} did not produce correct output: got `{actual}`, expected `{expected}`", binary.display())]
  UnexpectedOutput {
    binary: PathBuf,
    expected: String,
    actual: String,
  },

  #[error("binary {} exited successfully on malformed input in strict mode", binary.display())]
  StrictModeAccepted { binary: PathBuf },
}

/// The verified binary could not be archived.
#[derive(Debug, Error)]
pub enum PackagingError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("package already exists: {} (use --force to overwrite)", path.display())]
  PackageExists { path: PathBuf },

  #[error("failed to read binary {}: {source}", path.display())]
  ReadBinary { path: PathBuf, source: std::io::Error },

  #[error("failed to archive {} into {}: {source}", binary.display(), package.display())]
  Archive {
    binary: PathBuf,
    package: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Any failure that aborts a release run.
#[derive(Debug, Error)]
pub enum ReleaseError {
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("build error: {0}")]
  Build(#[from] BuildError),

  #[error("verification error: {0}")]
  Verification(#[from] VerificationError),

  #[error("packaging error: {0}")]
  Packaging(#[from] PackagingError),
}
