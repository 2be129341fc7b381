//! Implementation of the release run.
//!
//! Resolves the project root and toolchain, then drives the pipeline for one
//! architecture and prints the result.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use fxrelease_lib::config::resolve_root;
use fxrelease_lib::{
  Arch, CollisionPolicy, Pipeline, ReleaseConfig, ReleaseError, ReleaseReport, SystemRunner, Toolchain,
};

use crate::output::{
  OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_success, print_warning,
  truncate_hash,
};

pub struct ReleaseArgs {
  pub arch: Option<String>,
  pub root: Option<PathBuf>,
  pub toolchain: Option<PathBuf>,
  pub force: bool,
  pub checksum: bool,
  pub output: OutputFormat,
}

/// Execute a release.
///
/// The architecture is validated first so an unsupported value fails without
/// touching the filesystem or looking for a toolchain.
///
/// # Errors
///
/// Returns the first stage failure; the caller exits non-zero.
pub fn cmd_release(args: &ReleaseArgs) -> Result<()> {
  let started = Instant::now();

  let arch = Arch::from_selection(args.arch.as_deref()).map_err(ReleaseError::from)?;

  let root = resolve_root(args.root.as_deref()).map_err(ReleaseError::from)?;
  let collision = if args.force {
    CollisionPolicy::Overwrite
  } else {
    CollisionPolicy::Fail
  };
  let config = ReleaseConfig::from_root(&root)
    .map_err(ReleaseError::from)?
    .with_collision_policy(collision)
    .with_checksum(args.checksum);

  let toolchain = Toolchain::resolve(args.toolchain.as_deref()).map_err(ReleaseError::from)?;
  info!(
    root = %config.root.display(),
    toolchain = %toolchain.path().display(),
    "resolved configuration"
  );

  let pipeline = Pipeline::new(config, toolchain, SystemRunner);
  let report = pipeline
    .run(arch)
    .with_context(|| format!("Release for {} failed", arch))?;

  if args.output.is_json() {
    return print_json(&report);
  }

  print_summary(&report, started);
  Ok(())
}

fn print_summary(report: &ReleaseReport, started: Instant) {
  let package = &report.package;

  if package.replaced {
    print_warning(&format!("Replaced existing package {}", package.path.display()));
  }

  for outcome in &report.smoke_tests {
    print_info(&format!("Smoke test passed: {}", outcome.test));
  }

  print_success(&format!(
    "Released fxml {} for {}_{}",
    report.version, report.platform, report.arch
  ));
  print_stat("Binary", &report.artifact.display().to_string());
  print_stat("Package", &package.path.display().to_string());
  print_stat("Size", &format_bytes(package.size));
  if let (Some(sha256), Some(checksum_path)) = (&package.sha256, &package.checksum_path) {
    print_stat("SHA-256", truncate_hash(sha256));
    print_stat("Checksum", &checksum_path.display().to_string());
  }
  print_stat("Elapsed", &format_duration(started.elapsed()));
}
