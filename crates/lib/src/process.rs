//! Running external processes.
//!
//! Every child process the pipeline starts (the build toolchain and the
//! product binary under test) goes through [`ProcessRunner`], so stage
//! sequencing can be exercised against fakes without spawning anything.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

/// A program, its arguments and the bytes to feed it on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: PathBuf,
  args: Vec<String>,
  stdin: Option<Vec<u8>>,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      stdin: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Feed `input` on stdin. Without this the child's stdin is closed.
  pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
    self.stdin = Some(input.into());
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn arguments(&self) -> &[String] {
    &self.args
  }

  pub fn input(&self) -> Option<&[u8]> {
    self.stdin.as_deref()
  }

  /// Whether `arg` was passed verbatim.
  pub fn has_arg(&self, arg: &str) -> bool {
    self.args.iter().any(|a| a == arg)
  }

  /// Value of the first `<prefix><value>` style argument.
  pub fn arg_value(&self, prefix: &str) -> Option<&str> {
    self.args.iter().find_map(|a| a.strip_prefix(prefix))
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Everything a finished child process reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  /// Exit code, `None` when terminated by a signal.
  pub code: Option<i32>,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
}

impl ProcessOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  pub fn stdout_lossy(&self) -> String {
    String::from_utf8_lossy(&self.stdout).into_owned()
  }

  pub fn stderr_lossy(&self) -> String {
    String::from_utf8_lossy(&self.stderr).into_owned()
  }
}

/// Runs a process to completion and captures its output.
///
/// Implementations block until the child exits; there is no timeout.
pub trait ProcessRunner {
  /// Returns `Err` only when the process could not be run at all. A
  /// non-zero exit is reported through [`ProcessOutput::code`].
  fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
  fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
    (**self).run(invocation)
  }
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
    debug!(command = %invocation, "spawning process");

    let mut child = Command::new(&invocation.program)
      .args(&invocation.args)
      .stdin(if invocation.stdin.is_some() {
        Stdio::piped()
      } else {
        Stdio::null()
      })
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()?;

    // Feed stdin while stdout/stderr drain; a child may write before it reads.
    let feeder = match (child.stdin.take(), invocation.stdin.clone()) {
      (Some(mut pipe), Some(input)) => Some(thread::spawn(move || match pipe.write_all(&input) {
        // The child may exit without consuming its input.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
      })),
      _ => None,
    };

    let output = child.wait_with_output()?;
    if let Some(feeder) = feeder {
      feeder
        .join()
        .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
    }
    let output = ProcessOutput {
      code: output.status.code(),
      stdout: output.stdout,
      stderr: output.stderr,
    };

    debug!(command = %invocation, code = ?output.code, "process exited");
    if !output.stderr.is_empty() {
      debug!(stderr = %output.stderr_lossy(), "process stderr");
    }

    Ok(output)
  }
}
