//! fxrelease-lib: release pipeline for the fxml formatter
//!
//! Turns a target architecture into a verified, compressed package:
//! - `version`: reads the product version from project metadata
//! - `toolchain`: publishes the binary and moves it to its canonical name
//! - `smoke`: checks the binary's observable behaviour as a black box
//! - `package`: writes the `<product>_<platform>_<arch>.tar.gz` archive
//! - `pipeline`: sequences the stages and stops at the first failure

pub mod config;
pub mod consts;
pub mod error;
pub mod package;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod smoke;
pub mod toolchain;
pub mod types;
pub mod util;
pub mod version;

pub use config::{CollisionPolicy, ReleaseConfig};
pub use error::{BuildError, ConfigError, PackagingError, ReleaseError, VerificationError};
pub use pipeline::Pipeline;
pub use platform::{Arch, Os};
pub use process::{Invocation, ProcessOutput, ProcessRunner, SystemRunner};
pub use toolchain::Toolchain;
pub use types::{Package, ReleaseReport};
