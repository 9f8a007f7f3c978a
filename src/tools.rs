//! External tool invocation seam.
//!
//! The pipeline shells out to a preprocessor and a tag extractor. Both go
//! through the [`ToolRunner`] trait so pipeline-logic tests can substitute a
//! fake tool returning canned output instead of requiring a real toolchain.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one external tool run
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, if the process terminated normally
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability interface for running external tools.
///
/// Implementations should be thread-safe (`Send + Sync`) so independent
/// builds can run concurrently with a shared runner.
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`, blocking until it exits and
    /// capturing stdout/stderr. Spawn failures surface as `io::Error`.
    fn run(&self, program: &Path, args: &[OsString], cwd: &Path) -> std::io::Result<ToolOutput>;
}

/// Production runner delegating to `std::process::Command`
#[derive(Debug, Default, Clone)]
pub struct SystemToolRunner;

impl SystemToolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &Path, args: &[OsString], cwd: &Path) -> std::io::Result<ToolOutput> {
        let output = Command::new(program).args(args).current_dir(cwd).output()?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Removes tracked intermediate files when dropped.
///
/// Build directories are reused across builds; stale expanded sources or tag
/// targets from a failed run must not leak into the next one, so cleanup has
/// to happen on every exit path.
#[derive(Debug, Default)]
pub struct TempGuard {
    paths: Vec<PathBuf>,
}

impl TempGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file for removal on drop
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        for path in &self.paths {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("failed to remove intermediate file {}: {}", path.display(), e);
                }
            }
        }
    }
}
