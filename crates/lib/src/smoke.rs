//! Smoke tests run against the built binary before it may be packaged.
//!
//! The binary is treated as an opaque process. Two checks must both pass:
//! valid input is normalized exactly, and malformed input under `--strict`
//! makes the process exit non-zero.

use std::path::Path;

use tracing::{debug, info};

use crate::error::VerificationError;
use crate::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::types::{BuildArtifact, SmokeTest, SmokeTestOutcome, VerifiedArtifact};

/// Well-formed input for the formatting check.
pub const FORMAT_INPUT: &str = "<tag/>";

/// Exact output expected for [`FORMAT_INPUT`].
pub const FORMAT_EXPECTED: &str = "<tag />";

pub const STRICT_FLAG: &str = "--strict";

/// Malformed input for the strict-mode check.
pub const MALFORMED_INPUT: &str = "<invalid xml...";

pub struct SmokeTestRunner<'a> {
  runner: &'a dyn ProcessRunner,
}

impl<'a> SmokeTestRunner<'a> {
  pub fn new(runner: &'a dyn ProcessRunner) -> Self {
    Self { runner }
  }

  /// Run every check in order, stopping at the first failure.
  pub fn verify(&self, artifact: BuildArtifact) -> Result<VerifiedArtifact, VerificationError> {
    info!(binary = %artifact.path().display(), "testing");

    let outcomes = vec![
      self.check_formatting(artifact.path())?,
      self.check_strict_exit_code(artifact.path())?,
    ];

    info!(passed = outcomes.len(), "all smoke tests passed");
    Ok(VerifiedArtifact::new(artifact, outcomes))
  }

  fn check_formatting(&self, binary: &Path) -> Result<SmokeTestOutcome, VerificationError> {
    info!(test = %SmokeTest::Format, "running smoke test");

    let output = self.launch(SmokeTest::Format, binary, Invocation::new(binary).stdin(FORMAT_INPUT))?;

    if !output.success() {
      return Err(VerificationError::FormatFailed {
        binary: binary.to_path_buf(),
        code: output.code,
        stderr: output.stderr_lossy().trim().to_string(),
      });
    }

    let actual = output.stdout_lossy();
    if actual != FORMAT_EXPECTED {
      return Err(VerificationError::UnexpectedOutput {
        binary: binary.to_path_buf(),
        expected: FORMAT_EXPECTED.to_string(),
        actual,
      });
    }

    Ok(outcome(SmokeTest::Format, &output))
  }

  fn check_strict_exit_code(&self, binary: &Path) -> Result<SmokeTestOutcome, VerificationError> {
    info!(test = %SmokeTest::StrictExitCode, "running smoke test");

    let invocation = Invocation::new(binary).arg(STRICT_FLAG).stdin(MALFORMED_INPUT);
    let output = self.launch(SmokeTest::StrictExitCode, binary, invocation)?;

    // A non-zero exit, or termination by signal, is the expected result.
    if output.success() {
      return Err(VerificationError::StrictModeAccepted {
        binary: binary.to_path_buf(),
      });
    }

    debug!(code = ?output.code, "strict mode rejected malformed input");
    Ok(outcome(SmokeTest::StrictExitCode, &output))
  }

  fn launch(&self, test: SmokeTest, binary: &Path, invocation: Invocation) -> Result<ProcessOutput, VerificationError> {
    self.runner.run(&invocation).map_err(|source| VerificationError::Spawn {
      test,
      binary: binary.to_path_buf(),
      source,
    })
  }
}

fn outcome(test: SmokeTest, output: &ProcessOutput) -> SmokeTestOutcome {
  SmokeTestOutcome {
    test,
    passed: true,
    exit_code: output.code,
    stdout: output.stdout_lossy(),
    stderr: output.stderr_lossy(),
  }
}
