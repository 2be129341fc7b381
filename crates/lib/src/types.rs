//! Values flowing between pipeline stages.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::platform::{Arch, Os, Platform};

/// What to build: target architecture, stamped version and host platform.
///
/// Created once at pipeline start and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  arch: Arch,
  version: String,
  os: Os,
}

impl BuildRequest {
  pub fn new(arch: Arch, version: impl Into<String>, os: Os) -> Self {
    Self {
      arch,
      version: version.into(),
      os,
    }
  }

  pub fn arch(&self) -> Arch {
    self.arch
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn os(&self) -> Os {
    self.os
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.os, self.arch)
  }
}

/// The executable produced by the toolchain, at its canonical location.
///
/// Not eligible for packaging until it has been turned into a
/// [`VerifiedArtifact`] by the smoke tests.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
  path: PathBuf,
  request: BuildRequest,
}

impl BuildArtifact {
  pub(crate) fn new(path: PathBuf, request: BuildRequest) -> Self {
    Self { path, request }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn request(&self) -> &BuildRequest {
    &self.request
  }
}

/// A build artifact that passed every smoke test.
///
/// Only the smoke test runner constructs this type, so holding one proves
/// the binary was verified.
#[derive(Debug)]
pub struct VerifiedArtifact {
  artifact: BuildArtifact,
  outcomes: Vec<SmokeTestOutcome>,
}

impl VerifiedArtifact {
  pub(crate) fn new(artifact: BuildArtifact, outcomes: Vec<SmokeTestOutcome>) -> Self {
    Self { artifact, outcomes }
  }

  pub fn artifact(&self) -> &BuildArtifact {
    &self.artifact
  }

  pub fn outcomes(&self) -> &[SmokeTestOutcome] {
    &self.outcomes
  }

  pub(crate) fn into_outcomes(self) -> Vec<SmokeTestOutcome> {
    self.outcomes
  }
}

/// Identifies a smoke test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmokeTest {
  /// Valid input must be normalized exactly.
  Format,
  /// Malformed input under `--strict` must exit non-zero.
  StrictExitCode,
}

impl SmokeTest {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Format => "format",
      Self::StrictExitCode => "strict-exit-code",
    }
  }
}

impl fmt::Display for SmokeTest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Captured result of running one smoke test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeTestOutcome {
  pub test: SmokeTest,
  pub passed: bool,
  pub exit_code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

/// The distributable archive written by the packager.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
  pub name: String,
  pub path: PathBuf,
  pub size: u64,
  /// Hex SHA-256 of the archive when a checksum file was requested.
  pub sha256: Option<String>,
  pub checksum_path: Option<PathBuf>,
  /// Whether an existing package was overwritten.
  pub replaced: bool,
}

/// Summary of a successful release run.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
  pub version: String,
  pub arch: Arch,
  pub platform: Os,
  pub artifact: PathBuf,
  pub package: Package,
  pub smoke_tests: Vec<SmokeTestOutcome>,
}
