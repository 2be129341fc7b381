//! Release runs that must stop without producing a package.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{Binary, TestEnv};

#[test]
#[serial]
fn unsupported_arch_runs_nothing() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::Correct);

  env
    .fxrelease()
    .args(["--arch", "mips"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("unsupported architecture: mips"));

  assert!(env.toolchain_invocations().is_empty());
  assert!(!env.build_dir().exists());
  assert!(env.package_names().is_empty());
}

#[test]
#[serial]
fn missing_version_file_runs_nothing() {
  let env = TestEnv::without_version();
  env.install_toolchain(Binary::Correct);

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("version file not found"));

  assert!(env.toolchain_invocations().is_empty());
  assert!(env.package_names().is_empty());
}

#[test]
#[serial]
fn empty_version_file_runs_nothing() {
  let env = TestEnv::with_version("\n1.2.3\n");
  env.install_toolchain(Binary::Correct);

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("version file is empty"));

  assert!(env.toolchain_invocations().is_empty());
}

#[test]
#[serial]
fn toolchain_failure_stops_release() {
  let env = TestEnv::with_version("1.2.3");
  env.install_failing_toolchain();

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("build error"))
    .stderr(predicate::str::contains("restore failed"));

  assert_eq!(env.toolchain_invocations().len(), 1);
  assert!(env.package_names().is_empty());
}

#[test]
#[serial]
fn wrong_format_output_is_not_packaged() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::EchoesInput);

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("verification error"))
    .stderr(predicate::str::contains("did not produce correct output"))
    .stderr(predicate::str::contains("<tag/>"));

  assert!(env.package_names().is_empty());
}

#[test]
#[serial]
fn accepting_malformed_input_is_not_packaged() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::NeverFails);

  env
    .fxrelease()
    .args(["--arch", "arm64"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("verification error"))
    .stderr(predicate::str::contains("strict mode"));

  assert!(env.package_names().is_empty());
}

#[test]
#[serial]
fn missing_toolchain_executable_fails() {
  let env = TestEnv::with_version("1.2.3");

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("build error"));

  assert!(env.package_names().is_empty());
}
