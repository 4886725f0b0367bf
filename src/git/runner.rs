//! git::runner
//!
//! The process seam every external query goes through.
//!
//! # Design
//!
//! Queries never go through a shell. Each one is a program plus an explicit
//! argument vector, run to completion in a given working directory with
//! stdin closed. The [`CommandRunner`] trait exists so tests can substitute
//! canned output for the real executable.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum GitError {
    /// The program could not be started at all (missing binary, bad cwd).
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that was invoked
        program: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    Failed {
        /// The full command line, for diagnostics only
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Captured result of one finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and no stdout.
    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program with arguments in a directory and captures its output.
pub trait CommandRunner {
    /// Run `program args...` with `cwd` as the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Spawn`] if the process could not be started.
    /// A non-zero exit is *not* an error at this level; it is reported
    /// through [`CommandOutput::code`].
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<CommandOutput, GitError>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<CommandOutput, GitError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
