//! Building the product with the external toolchain.
//!
//! The toolchain publishes a self-contained executable under its own default
//! name; [`ToolchainInvoker::build`] then moves it to the canonical product
//! name inside the same build directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ReleaseConfig;
use crate::consts::{TOOLCHAIN_ENV, TOOLCHAIN_PROGRAM};
use crate::error::{BuildError, ConfigError};
use crate::process::{Invocation, ProcessRunner};
use crate::types::{BuildArtifact, BuildRequest};

/// Location of the build toolchain executable.
///
/// Resolved once by the caller and handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  path: PathBuf,
}

impl Toolchain {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Locate the toolchain.
  ///
  /// Precedence: `explicit`, then `FXRELEASE_TOOLCHAIN`, then `dotnet` on `PATH`.
  pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Ok(Self::new(path));
    }

    if let Some(path) = std::env::var_os(TOOLCHAIN_ENV).filter(|v| !v.is_empty()) {
      return Ok(Self::new(path));
    }

    which::which(TOOLCHAIN_PROGRAM)
      .map(Self::new)
      .map_err(|e| ConfigError::ToolchainNotFound {
        program: TOOLCHAIN_PROGRAM.to_string(),
        message: e.to_string(),
      })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

/// The publish command for `request`.
pub fn publish_invocation(toolchain: &Toolchain, config: &ReleaseConfig, request: &BuildRequest) -> Invocation {
  Invocation::new(toolchain.path()).args([
    "publish".to_string(),
    config.project_dir.display().to_string(),
    "--configuration=release".to_string(),
    format!("--output={}", config.build_dir.display()),
    "--self-contained".to_string(),
    "true".to_string(),
    format!("--arch={}", request.arch().toolchain_id()),
    format!("/p:Version={}", request.version()),
  ])
}

pub struct ToolchainInvoker<'a> {
  toolchain: &'a Toolchain,
  config: &'a ReleaseConfig,
  runner: &'a dyn ProcessRunner,
}

impl<'a> ToolchainInvoker<'a> {
  pub fn new(toolchain: &'a Toolchain, config: &'a ReleaseConfig, runner: &'a dyn ProcessRunner) -> Self {
    Self {
      toolchain,
      config,
      runner,
    }
  }

  /// Build `request` and return the binary at its canonical path.
  ///
  /// The build directory is not cleaned first; a canonical binary left by a
  /// previous run is replaced.
  pub fn build(&self, request: &BuildRequest) -> Result<BuildArtifact, BuildError> {
    info!(arch = %request.arch(), version = %request.version(), "building");

    let invocation = publish_invocation(self.toolchain, self.config, request);
    let command = invocation.to_string();
    debug!(command = %command, "invoking toolchain");

    let output = self
      .runner
      .run(&invocation)
      .map_err(|source| BuildError::Spawn {
        command: command.clone(),
        source,
      })?;

    if !output.success() {
      return Err(BuildError::Failed {
        command,
        code: output.code,
        stderr: output.stderr_lossy().trim().to_string(),
      });
    }

    let os = request.os();
    let produced = self.config.build_dir.join(os.executable_name(&self.config.toolchain_output));
    let canonical = self.config.build_dir.join(os.executable_name(&self.config.product));

    if !produced.is_file() {
      return Err(BuildError::MissingOutput { path: produced });
    }

    fs::rename(&produced, &canonical).map_err(|source| BuildError::Relocate {
      from: produced.clone(),
      to: canonical.clone(),
      source,
    })?;

    let path = dunce::canonicalize(&canonical).unwrap_or(canonical);
    info!(path = %path.display(), "build complete");

    Ok(BuildArtifact::new(path, request.clone()))
  }
}
