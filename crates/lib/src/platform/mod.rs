//! Host and target platform identities.
//!
//! The host [`Os`] is always detected from the running process; the target
//! [`Arch`] is selected by the caller from a closed set.

pub mod arch;
pub mod os;

pub use arch::Arch;
pub use os::Os;

use std::fmt;

/// Host/target pair a release is produced for (e.g., "linux_arm64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Returns the `<os>_<arch>` qualifier used in package names
  pub fn qualifier(&self) -> String {
    format!("{}_{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.qualifier())
  }
}
