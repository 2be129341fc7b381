//! The release pipeline driver.
//!
//! Sequences version resolution, build, smoke tests and packaging for one
//! architecture, aborting on the first failure. Runs are synchronous, never
//! retried, and not resumable. Only one pipeline may run per project root at a
//! time; nothing here locks the build or packages directories.

use tracing::info;

use crate::config::ReleaseConfig;
use crate::error::{ConfigError, ReleaseError};
use crate::package::Packager;
use crate::platform::{Arch, Os};
use crate::process::ProcessRunner;
use crate::smoke::SmokeTestRunner;
use crate::toolchain::{Toolchain, ToolchainInvoker};
use crate::types::{BuildRequest, ReleaseReport};
use crate::version::resolve_version;

pub struct Pipeline<R> {
  config: ReleaseConfig,
  toolchain: Toolchain,
  runner: R,
  host: Option<Os>,
}

impl<R: ProcessRunner> Pipeline<R> {
  /// Create a pipeline for the host this process runs on.
  pub fn new(config: ReleaseConfig, toolchain: Toolchain, runner: R) -> Self {
    Self {
      config,
      toolchain,
      runner,
      host: Os::current(),
    }
  }

  /// Replace the detected host, e.g. to exercise another platform's naming.
  pub fn with_host(mut self, host: Os) -> Self {
    self.host = Some(host);
    self
  }

  pub fn config(&self) -> &ReleaseConfig {
    &self.config
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Build, verify and package `arch`.
  ///
  /// Configuration problems (unsupported host, missing version, package
  /// collision under the fail policy) are reported before the toolchain is
  /// invoked.
  pub fn run(&self, arch: Arch) -> Result<ReleaseReport, ReleaseError> {
    let os = self
      .host
      .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;

    let version = resolve_version(&self.config.version_file)?;
    let request = BuildRequest::new(arch, version, os);
    info!(
      version = %request.version(),
      arch = %arch,
      platform = %os,
      "starting release"
    );

    let packager = Packager::new(&self.config);
    packager.ensure_available(&request)?;

    let artifact = ToolchainInvoker::new(&self.toolchain, &self.config, &self.runner).build(&request)?;
    let artifact_path = artifact.path().to_path_buf();

    let verified = SmokeTestRunner::new(&self.runner).verify(artifact)?;
    let package = packager.package(&verified)?;

    info!(package = %package.path.display(), "release complete");

    Ok(ReleaseReport {
      version: request.version().to_string(),
      arch,
      platform: os,
      artifact: artifact_path,
      package,
      smoke_tests: verified.into_outcomes(),
    })
  }
}
