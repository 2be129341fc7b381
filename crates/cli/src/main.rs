mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmd::{ReleaseArgs, cmd_release};
use output::{OutputFormat, error_chain, print_error};

/// Build, smoke-test and package the fxml formatter
#[derive(Parser)]
#[command(name = "fxrelease")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Target architecture: amd64 or arm64 [default: amd64]
  #[arg(short, long)]
  arch: Option<String>,

  /// Project root containing src/version.txt [env: FXRELEASE_ROOT] [default: current directory]
  #[arg(long)]
  root: Option<PathBuf>,

  /// Build toolchain executable [env: FXRELEASE_TOOLCHAIN] [default: dotnet on PATH]
  #[arg(long)]
  toolchain: Option<PathBuf>,

  /// Overwrite an existing package instead of failing
  #[arg(short, long)]
  force: bool,

  /// Write a .sha256 checksum file next to the package
  #[arg(long)]
  checksum: bool,

  /// Output format for the release summary
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = ReleaseArgs {
    arch: cli.arch,
    root: cli.root,
    toolchain: cli.toolchain,
    force: cli.force,
    checksum: cli.checksum,
    output: cli.output,
  };

  match cmd_release(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&error_chain(&err));
      ExitCode::FAILURE
    }
  }
}
