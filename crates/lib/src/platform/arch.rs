use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Target CPU architectures a release can be built for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  #[default]
  Amd64,
  Arm64,
}

impl Arch {
  /// Every accepted architecture, in the order shown to users
  pub const ALL: [Arch; 2] = [Arch::Amd64, Arch::Arm64];

  /// Returns the lowercase identifier used on the command line and in package names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Amd64 => "amd64",
      Self::Arm64 => "arm64",
    }
  }

  /// Identifier the build toolchain expects for `--arch`
  pub fn toolchain_id(&self) -> &'static str {
    match self {
      Self::Amd64 => "x64",
      Self::Arm64 => "arm64",
    }
  }

  /// Parse an optional user selection, falling back to the default architecture
  pub fn from_selection(selection: Option<&str>) -> Result<Self, ConfigError> {
    selection.map_or(Ok(Self::default()), str::parse::<Self>)
  }
}

impl FromStr for Arch {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|arch| arch.as_str() == s)
      .ok_or_else(|| ConfigError::UnsupportedArch(s.to_string()))
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
