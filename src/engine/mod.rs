//! engine
//!
//! Resolves where `git.json` goes and drives the collector over each target.
//!
//! # Architecture
//!
//! ```text
//! Context -> resolve_targets -> run_targets -> RunSummary
//!                                   |
//!                                   +-> Collector::collect (once per directory)
//! ```
//!
//! # Invariants
//!
//! - Targets are processed in order, one at a time
//! - A failed target never prevents the remaining targets from being tried
//! - The repository context is an explicit value, never read from process
//!   state after [`Context::working_dir`] resolves it

pub mod collect;

pub use collect::{Collector, CollectorError};

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::config::Config;

/// Execution context shared by a run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to run in (defaults to the process working directory).
    pub cwd: Option<PathBuf>,
    /// The git executable to invoke.
    pub git_binary: PathBuf,
    /// Explicit manifest to read defaults from.
    pub manifest: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Suppress operator output.
    pub quiet: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            git_binary: PathBuf::from("git"),
            manifest: None,
            debug: false,
            quiet: false,
        }
    }
}

impl Context {
    /// The repository context: `cwd` if set, else the process working
    /// directory.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Output directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// A single directory named on the command line.
    Explicit(PathBuf),
    /// The configured default directories.
    Defaults(Vec<PathBuf>),
}

impl Targets {
    /// The directories, in processing order.
    pub fn dirs(&self) -> &[PathBuf] {
        match self {
            Targets::Explicit(dir) => std::slice::from_ref(dir),
            Targets::Defaults(dirs) => dirs,
        }
    }
}

/// One directory that could not be written.
#[derive(Debug)]
pub struct TargetFailure {
    /// The directory as it was requested.
    pub dir: PathBuf,
    /// Why it failed.
    pub error: CollectorError,
}

/// Outcome of [`run_targets`].
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Absolute paths of the files written, in order.
    pub written: Vec<PathBuf>,
    /// Directories that failed, in order.
    pub failures: Vec<TargetFailure>,
}

impl RunSummary {
    /// Whether every target was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Collect into every target directory, continuing past failures.
pub fn run_targets(collector: &Collector, targets: &Targets) -> RunSummary {
    let mut summary = RunSummary::default();

    for dir in targets.dirs() {
        match collector.collect(dir) {
            Ok(path) => summary.written.push(path),
            Err(error) => {
                warn!(dir = %dir.display(), error = %error, "could not write git info");
                summary.failures.push(TargetFailure {
                    dir: dir.clone(),
                    error,
                });
            }
        }
    }

    summary
}

/// An explicit directory wins; otherwise the defaults configured for
/// `work_dir`.
///
/// The manifest is only read when no explicit directory is given. Config
/// warnings are logged, not returned.
pub fn resolve_targets(
    ctx: &Context,
    work_dir: &Path,
    explicit: Option<PathBuf>,
) -> Result<Targets, crate::core::config::ConfigError> {
    if let Some(dir) = explicit {
        return Ok(Targets::Explicit(dir));
    }

    let result = Config::load(work_dir, ctx.manifest.as_deref())?;
    for warning in &result.warnings {
        warn!(path = %warning.path.display(), "{}", warning.message);
    }
    match result.config.loaded_from() {
        Some(path) => debug!(manifest = %path.display(), "output directories from manifest"),
        None => debug!("no manifest settings, using default output directory"),
    }
    Ok(Targets::Defaults(result.config.output_dirs().to_vec()))
}
