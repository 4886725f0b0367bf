//! In-memory [`CommandRunner`] for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::runner::{CommandOutput, CommandRunner, GitError};

/// Answers commands from a table keyed by `"<program> <args...>"`.
///
/// Commands not in the table exit with status 1 and no output. An
/// unavailable runner fails every command with [`GitError::Spawn`].
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    unavailable: bool,
    cwds: RefCell<Vec<PathBuf>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A runner for which no program exists.
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), CommandOutput::ok(stdout));
        self
    }

    pub(crate) fn fail(mut self, command: &str, code: i32) -> Self {
        self.responses
            .insert(command.to_string(), CommandOutput::exit(code));
        self
    }

    /// Working directories seen so far, in call order.
    pub(crate) fn cwds(&self) -> Vec<PathBuf> {
        self.cwds.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<CommandOutput, GitError> {
        self.cwds.borrow_mut().push(cwd.to_path_buf());

        if self.unavailable {
            return Err(GitError::Spawn {
                program: program.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }

        let mut key = program.display().to_string();
        for arg in args {
            key.push(' ');
            key.push_str(arg);
        }

        Ok(self
            .responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CommandOutput::exit(1)))
    }
}
