//! Shared test helpers for CLI integration tests.
//!
//! Each test gets a temporary project root plus a fake `dotnet` shell script
//! that "publishes" a fake `FormatXML` shell script with a chosen behaviour.

use std::fs::{self, File};
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use flate2::read::GzDecoder;
use tempfile::TempDir;

/// How the published product binary behaves.
#[derive(Debug, Clone, Copy)]
pub enum Binary {
  /// Normalizes `<tag/>` and rejects input under `--strict`.
  Correct,
  /// Echoes its input unchanged.
  EchoesInput,
  /// Prints the expected output and exits zero even under `--strict`.
  NeverFails,
}

impl Binary {
  fn script(self) -> &'static str {
    match self {
      Binary::Correct => {
        r#"#!/bin/sh
input=$(cat)
for arg in "$@"; do
  if [ "$arg" = "--strict" ]; then
    echo "An error occurred when running fxml" >&2
    exit 1
  fi
done
if [ "$input" = "<tag/>" ]; then
  printf '%s' '<tag />'
else
  printf '%s' "$input"
fi
"#
      }
      Binary::EchoesInput => {
        r#"#!/bin/sh
cat
"#
      }
      Binary::NeverFails => {
        r#"#!/bin/sh
cat > /dev/null
printf '%s' '<tag />'
"#
      }
    }
  }
}

/// Toolchain script template. `@LOG@` and `@BINARY@` are substituted.
const PUBLISHING_TOOLCHAIN: &str = r#"#!/bin/sh
echo "$@" >> "@LOG@"
out=""
for arg in "$@"; do
  case "$arg" in
    --output=*) out="${arg#--output=}" ;;
  esac
done
if [ -z "$out" ]; then
  echo "missing --output" >&2
  exit 2
fi
mkdir -p "$out"
cat > "$out/FormatXML" <<'FXML_BINARY'
@BINARY@FXML_BINARY
chmod +x "$out/FormatXML"
"#;

const FAILING_TOOLCHAIN: &str = r#"#!/bin/sh
echo "$@" >> "@LOG@"
echo "error NU1101: restore failed" >&2
exit 1
"#;

/// Isolated project root with a fake toolchain.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Project whose version file holds `version`.
  pub fn with_version(version: &str) -> Self {
    let env = Self::without_version();
    env.write_file("project/src/version.txt", version);
    env
  }

  /// Project without a version file.
  pub fn without_version() -> Self {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("project").join("src")).unwrap();
    Self { temp }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn root(&self) -> PathBuf {
    let p = self.temp.path().join("project");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn packages_dir(&self) -> PathBuf {
    self.root().join("packages")
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root().join("src").join("build")
  }

  pub fn toolchain_path(&self) -> PathBuf {
    self.temp.path().join("bin").join("dotnet")
  }

  fn toolchain_log(&self) -> PathBuf {
    self.temp.path().join("toolchain.log")
  }

  /// Install a toolchain that publishes `binary`.
  pub fn install_toolchain(&self, binary: Binary) {
    let script = PUBLISHING_TOOLCHAIN
      .replace("@LOG@", &self.toolchain_log().display().to_string())
      .replace("@BINARY@", binary.script());
    self.write_executable(&self.toolchain_path(), &script);
  }

  /// Install a toolchain that always fails.
  pub fn install_failing_toolchain(&self) {
    let script = FAILING_TOOLCHAIN.replace("@LOG@", &self.toolchain_log().display().to_string());
    self.write_executable(&self.toolchain_path(), &script);
  }

  fn write_executable(&self, path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Argument lines the toolchain was invoked with, one per run.
  pub fn toolchain_invocations(&self) -> Vec<String> {
    match fs::read_to_string(self.toolchain_log()) {
      Ok(log) => log.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// File names in the packages directory, sorted.
  pub fn package_names(&self) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(self.packages_dir()) {
      Ok(entries) => entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect(),
      Err(_) => Vec::new(),
    };
    names.sort();
    names
  }

  /// Get a pre-configured Command for the fxrelease binary.
  ///
  /// The project root and toolchain are passed through the environment so
  /// flags stay free for the test.
  pub fn fxrelease(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("fxrelease");
    cmd.env("FXRELEASE_ROOT", self.root());
    cmd.env("FXRELEASE_TOOLCHAIN", self.toolchain_path());
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Package file name expected on this host.
pub fn expected_package(arch: &str) -> String {
  let os = fxrelease_lib::Os::current().unwrap();
  format!("fxml_{}_{}.tar.gz", os, arch)
}

/// (path, content) of every entry in a tar.gz.
pub fn archive_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
  let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
  archive
    .entries()
    .unwrap()
    .map(|entry| {
      let mut entry = entry.unwrap();
      let name = entry.path().unwrap().to_string_lossy().into_owned();
      let mut content = Vec::new();
      entry.read_to_end(&mut content).unwrap();
      (name, content)
    })
    .collect()
}
