use std::fmt;

use serde::Serialize;

/// Host operating systems a package can be produced on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  Darwin,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  ///
  /// Returns `None` if the OS is not supported
  pub fn current() -> Option<Self> {
    Self::from_rust_os(std::env::consts::OS)
  }

  /// Map a Rust `target_os` name onto a supported host
  pub fn from_rust_os(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Darwin),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier used in package names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::Darwin => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Suffix appended to executable file names on this OS
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      Self::Linux | Self::Darwin => "",
    }
  }

  /// File name of the executable called `stem` on this OS
  pub fn executable_name(&self, stem: &str) -> String {
    format!("{}{}", stem, self.exe_suffix())
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
