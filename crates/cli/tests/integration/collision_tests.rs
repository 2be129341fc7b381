//! Behaviour when a package for the same platform already exists.

use std::fs;

use predicates::prelude::*;
use serial_test::serial;

use super::common::{Binary, TestEnv, expected_package};

#[test]
#[serial]
fn second_release_fails_before_building() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::Correct);
  let package = env.packages_dir().join(expected_package("amd64"));

  env.fxrelease().assert().success();
  let first = fs::read(&package).unwrap();

  env
    .fxrelease()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("package already exists"))
    .stderr(predicate::str::contains("--force"));

  assert_eq!(env.toolchain_invocations().len(), 1);
  assert_eq!(fs::read(&package).unwrap(), first);
}

#[test]
#[serial]
fn force_replaces_existing_package() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::Correct);

  env.fxrelease().assert().success();
  env
    .fxrelease()
    .arg("--force")
    .assert()
    .success()
    .stderr(predicate::str::contains("Replaced existing package"));

  assert_eq!(env.toolchain_invocations().len(), 2);
  assert_eq!(env.package_names(), vec![expected_package("amd64")]);
}

#[test]
#[serial]
fn architectures_do_not_collide() {
  let env = TestEnv::with_version("1.2.3");
  env.install_toolchain(Binary::Correct);

  env.fxrelease().args(["--arch", "amd64"]).assert().success();
  env.fxrelease().args(["--arch", "arm64"]).assert().success();

  assert_eq!(
    env.package_names(),
    vec![expected_package("amd64"), expected_package("arm64")]
  );
}
