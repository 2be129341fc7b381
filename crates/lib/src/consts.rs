//! Fixed names and project-relative locations used by the release pipeline.

/// Canonical name of the shipped binary and prefix of every package.
pub const PRODUCT_NAME: &str = "fxml";

/// Name the toolchain gives the published executable before relocation.
pub const TOOLCHAIN_OUTPUT_NAME: &str = "FormatXML";

/// Executable looked up on `PATH` when no toolchain is configured.
pub const TOOLCHAIN_PROGRAM: &str = "dotnet";

/// Version metadata file; only the first line is read.
pub const VERSION_FILE: &str = "src/version.txt";

/// Project directory handed to the toolchain.
pub const PROJECT_DIR: &str = "src/FormatXML";

/// Toolchain output directory. Never cleaned between runs.
pub const BUILD_DIR: &str = "src/build";

/// Distribution directory receiving the archives.
pub const PACKAGES_DIR: &str = "packages";

/// Environment variable overriding the project root.
pub const ROOT_ENV: &str = "FXRELEASE_ROOT";

/// Environment variable overriding the toolchain executable.
pub const TOOLCHAIN_ENV: &str = "FXRELEASE_TOOLCHAIN";
