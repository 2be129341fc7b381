//! Packaging a verified binary into a distributable archive.
//!
//! Each package is a gzip-compressed tar named
//! `<product>_<platform>_<arch>.tar.gz` holding exactly one entry: the binary
//! under its canonical name. A package is written once; an existing file is
//! only replaced under [`CollisionPolicy::Overwrite`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, info, warn};

use crate::config::{CollisionPolicy, ReleaseConfig};
use crate::error::PackagingError;
use crate::platform::Platform;
use crate::types::{BuildRequest, Package, VerifiedArtifact};
use crate::util::hash::{checksum_line, hash_file};

/// Deterministic package file name for `product` on `platform`.
pub fn package_name(product: &str, platform: Platform) -> String {
  format!("{}_{}.tar.gz", product, platform.qualifier())
}

/// File name of the checksum written next to `package_name`.
pub fn checksum_name(package_name: &str) -> String {
  format!("{}.sha256", package_name)
}

pub struct Packager<'a> {
  config: &'a ReleaseConfig,
}

impl<'a> Packager<'a> {
  pub fn new(config: &'a ReleaseConfig) -> Self {
    Self { config }
  }

  pub fn package_path(&self, request: &BuildRequest) -> PathBuf {
    self
      .config
      .packages_dir
      .join(package_name(&self.config.product, request.platform()))
  }

  /// Fail before any work is done if the package for `request` would collide.
  ///
  /// Always succeeds under [`CollisionPolicy::Overwrite`].
  pub fn ensure_available(&self, request: &BuildRequest) -> Result<(), PackagingError> {
    if self.config.collision == CollisionPolicy::Overwrite {
      return Ok(());
    }

    let package = self.package_path(request);
    let mut targets = vec![package.clone()];
    if self.config.checksum {
      targets.push(checksum_path(&package));
    }

    match targets.into_iter().find(|path| path.exists()) {
      Some(path) => Err(PackagingError::PackageExists { path }),
      None => Ok(()),
    }
  }

  /// Archive the verified binary.
  pub fn package(&self, verified: &VerifiedArtifact) -> Result<Package, PackagingError> {
    let artifact = verified.artifact();
    let request = artifact.request();
    info!(platform = %request.platform(), "packaging");

    let packages_dir = &self.config.packages_dir;
    fs::create_dir_all(packages_dir).map_err(|source| PackagingError::CreateDir {
      path: packages_dir.clone(),
      source,
    })?;

    let name = package_name(&self.config.product, request.platform());
    let path = packages_dir.join(&name);
    let replaced = path.exists();
    if replaced {
      warn!(path = %path.display(), "overwriting existing package");
    }

    let entry_name = request.os().executable_name(&self.config.product);
    let binary = File::open(artifact.path()).map_err(|source| PackagingError::ReadBinary {
      path: artifact.path().to_path_buf(),
      source,
    })?;
    let file = self.create(&path)?;

    // From here on a failure must not leave a package behind.
    let finished = write_archive(file, binary, &entry_name)
      .map_err(|source| PackagingError::Archive {
        binary: artifact.path().to_path_buf(),
        package: path.clone(),
        source,
      })
      .and_then(|()| {
        fs::metadata(&path)
          .map(|m| m.len())
          .map_err(|source| write_error(&path, source))
      })
      .and_then(|size| {
        if self.config.checksum {
          let (hash, sidecar) = self.write_checksum(&path, &name)?;
          Ok((size, Some(hash), Some(sidecar)))
        } else {
          Ok((size, None, None))
        }
      });

    let (size, sha256, checksum_path) = match finished {
      Ok(done) => done,
      Err(err) => {
        let _ = fs::remove_file(&path);
        warn!(path = %path.display(), "removed incomplete package");
        return Err(err);
      }
    };

    info!(path = %path.display(), "package created");

    Ok(Package {
      name,
      path,
      size,
      sha256,
      checksum_path,
      replaced,
    })
  }

  fn write_checksum(&self, package: &Path, name: &str) -> Result<(String, PathBuf), PackagingError> {
    let hash = hash_file(package).map_err(|source| write_error(package, source))?;
    let sidecar = checksum_path(package);

    let mut file = self.create(&sidecar)?;
    if let Err(source) = file.write_all(checksum_line(&hash, name).as_bytes()) {
      let _ = fs::remove_file(&sidecar);
      return Err(write_error(&sidecar, source));
    }

    debug!(path = %sidecar.display(), sha256 = %hash, "checksum written");
    Ok((hash.0, sidecar))
  }

  /// Open `path` for writing according to the collision policy.
  fn create(&self, path: &Path) -> Result<File, PackagingError> {
    let mut options = OpenOptions::new();
    options.write(true);
    match self.config.collision {
      CollisionPolicy::Fail => {
        options.create_new(true);
      }
      CollisionPolicy::Overwrite => {
        options.create(true).truncate(true);
      }
    }

    options.open(path).map_err(|source| match source.kind() {
      ErrorKind::AlreadyExists => PackagingError::PackageExists {
        path: path.to_path_buf(),
      },
      _ => write_error(path, source),
    })
  }
}

fn checksum_path(package: &Path) -> PathBuf {
  let name = package
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  package.with_file_name(checksum_name(&name))
}

fn write_error(path: &Path, source: io::Error) -> PackagingError {
  PackagingError::Write {
    path: path.to_path_buf(),
    source,
  }
}

/// Write a single-entry tar.gz holding the open `binary` as `entry_name`.
fn write_archive(file: File, mut binary: File, entry_name: &str) -> io::Result<()> {
  let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
  let mut builder = tar::Builder::new(encoder);

  let mut header = tar::Header::new_gnu();
  header.set_metadata(&binary.metadata()?);
  header.set_mode(0o755);
  builder.append_data(&mut header, entry_name, &mut binary)?;

  let encoder = builder.into_inner()?;
  encoder.finish()?.flush()
}
