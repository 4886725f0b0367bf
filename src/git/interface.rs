//! git::interface
//!
//! Read-only queries against a repository, run through the `git` executable.
//!
//! This module is the **single doorway** to Git for the collector. Every
//! metadata field that comes from the repository is produced by one method
//! here, and every method goes through the same fallback wrapper:
//!
//! - [`Git::query`]: trimmed stdout on success, `""` on any failure
//! - [`Git::query_or`]: trimmed stdout on success, a fixed value when git
//!   ran but exited non-zero, `""` when git could not be started
//! - [`Git::exit_code`]: the raw exit status, for probes like `diff --quiet`
//!
//! No query ever returns an error to the caller. Failures are logged at
//! `debug` level and replaced by the fallback.
//!
//! # Example
//!
//! ```no_run
//! use git_json::git::{Git, SystemRunner};
//! use std::path::Path;
//!
//! let git = Git::new(&SystemRunner, Path::new("git"), Path::new("."));
//! println!("HEAD is {}", git.commit_id());
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use super::runner::{CommandOutput, CommandRunner, GitError};

/// `--date=format:` pattern for commit timestamps (`DD.MM.YYYY @ HH:MM:SS`).
pub const COMMIT_DATE_FORMAT: &str = "--date=format:%d.%m.%Y @ %H:%M:%S";

/// Handle for querying one repository context.
///
/// Holds no repository state of its own: it only knows which executable to
/// run and which directory to run it in.
pub struct Git<'r> {
    runner: &'r dyn CommandRunner,
    binary: PathBuf,
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("binary", &self.binary)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl<'r> Git<'r> {
    /// Create a query handle.
    ///
    /// `binary` is the git executable (usually just `git`, resolved through
    /// `PATH`); `work_dir` is the repository context every query runs in.
    pub fn new(runner: &'r dyn CommandRunner, binary: &Path, work_dir: &Path) -> Self {
        Self {
            runner,
            binary: binary.to_path_buf(),
            work_dir: work_dir.to_path_buf(),
        }
    }

    // =========================================================================
    // Fallback wrappers
    // =========================================================================

    /// Run `git args...` and require a zero exit.
    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = self.runner.run(&self.binary, args, &self.work_dir)?;
        if output.success() {
            Ok(output)
        } else {
            Err(GitError::Failed {
                command: self.command_line(args),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Trimmed stdout of `git args...`, or `""` if the command failed for
    /// any reason.
    pub fn query(&self, args: &[&str]) -> String {
        match self.run_checked(args) {
            Ok(output) => output.stdout.trim().to_string(),
            Err(err) => {
                debug!(error = %err, "git query failed, using empty value");
                String::new()
            }
        }
    }

    /// Like [`Git::query`], but a non-zero exit yields `fallback`.
    ///
    /// A git that cannot be started still yields `""`.
    pub fn query_or(&self, args: &[&str], fallback: &str) -> String {
        match self.run_checked(args) {
            Ok(output) => output.stdout.trim().to_string(),
            Err(err @ GitError::Failed { .. }) => {
                debug!(error = %err, fallback, "git query failed, using fallback");
                fallback.to_string()
            }
            Err(err) => {
                debug!(error = %err, "git query failed, using empty value");
                String::new()
            }
        }
    }

    /// Exit code of `git args...`, or `None` if it could not be run or was
    /// killed by a signal.
    pub fn exit_code(&self, args: &[&str]) -> Option<i32> {
        match self.runner.run(&self.binary, args, &self.work_dir) {
            Ok(output) => output.code,
            Err(err) => {
                debug!(error = %err, "git probe failed");
                None
            }
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.binary.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    // =========================================================================
    // Branch and upstream
    // =========================================================================

    /// Short name of the current branch (`HEAD` when detached).
    pub fn branch(&self) -> String {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Commits on HEAD not on its upstream. `"0"` when there is no upstream.
    pub fn ahead_of_upstream(&self) -> String {
        self.query_or(&["rev-list", "--count", "HEAD@{upstream}..HEAD"], "0")
    }

    /// Commits on the upstream not on HEAD. `"0"` when there is no upstream.
    pub fn behind_upstream(&self) -> String {
        self.query_or(&["rev-list", "--count", "HEAD..HEAD@{upstream}"], "0")
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Configured `user.email`.
    pub fn config_user_email(&self) -> String {
        self.query(&["config", "user.email"])
    }

    /// Configured `user.name`.
    pub fn config_user_name(&self) -> String {
        self.query(&["config", "user.name"])
    }

    /// URL of the remote named `origin`.
    pub fn origin_url(&self) -> String {
        self.query(&["config", "--get", "remote.origin.url"])
    }

    // =========================================================================
    // Tags and describe
    // =========================================================================

    /// Nearest reachable tag name, or the abbreviated hash when no tag is
    /// reachable.
    pub fn closest_tag(&self) -> String {
        self.query(&["describe", "--tags", "--abbrev=0", "--match=*", "--always"])
    }

    /// Tags pointing exactly at HEAD, newline separated.
    pub fn tags_at_head(&self) -> String {
        self.query(&["tag", "--points-at", "HEAD"])
    }

    /// `git describe --always --dirty`.
    pub fn describe(&self) -> String {
        self.query(&["describe", "--always", "--dirty"])
    }

    /// `git describe --always --dirty --abbrev=10`.
    pub fn describe_short(&self) -> String {
        self.query(&["describe", "--always", "--dirty", "--abbrev=10"])
    }

    // =========================================================================
    // HEAD commit
    // =========================================================================

    /// Full HEAD hash.
    pub fn commit_id(&self) -> String {
        self.query(&["rev-parse", "HEAD"])
    }

    /// Abbreviated HEAD hash.
    pub fn commit_id_abbrev(&self) -> String {
        self.query(&["rev-parse", "--short", "HEAD"])
    }

    /// Author timestamp of HEAD in [`COMMIT_DATE_FORMAT`].
    pub fn author_time(&self) -> String {
        self.query(&["log", "-1", "--format=%ad", COMMIT_DATE_FORMAT])
    }

    /// Committer timestamp of HEAD in [`COMMIT_DATE_FORMAT`].
    pub fn committer_time(&self) -> String {
        self.query(&["log", "-1", "--format=%cd", COMMIT_DATE_FORMAT])
    }

    /// Full HEAD commit message (raw, newlines intact).
    pub fn message_full(&self) -> String {
        self.query(&["log", "-1", "--format=%B"])
    }

    /// HEAD commit subject line.
    pub fn message_short(&self) -> String {
        self.query(&["log", "-1", "--format=%s"])
    }

    /// HEAD author email.
    pub fn author_email(&self) -> String {
        self.query(&["log", "-1", "--format=%ae"])
    }

    /// HEAD author name.
    pub fn author_name(&self) -> String {
        self.query(&["log", "-1", "--format=%an"])
    }

    /// Number of commits reachable from HEAD.
    pub fn total_commit_count(&self) -> String {
        self.query(&["rev-list", "--count", "HEAD"])
    }

    // =========================================================================
    // Working tree
    // =========================================================================

    /// Whether tracked files differ from HEAD (staged or not).
    ///
    /// Only an exit status of 1 from `git diff --quiet` counts as dirty;
    /// errors (no repository, no HEAD, no git) read as clean.
    pub fn is_dirty(&self) -> bool {
        self.exit_code(&["diff", "--quiet", "HEAD"]) == Some(1)
    }
}
