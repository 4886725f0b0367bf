//! engine::collect
//!
//! The metadata collector: run every query, assemble a [`GitInfo`], write it.
//!
//! # Failure tiers
//!
//! - A query that fails contributes its fallback value and is logged at
//!   `debug`. It never fails the collection.
//! - Failing to create the output directory or write the file is a
//!   [`CollectorError`] for that one output directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::Context;
use crate::core::host;
use crate::core::record::{bool_value, escape_newlines, GitInfo, BUILD_VERSION, OUTPUT_FILE};
use crate::git::{CommandRunner, Git, SystemRunner};

/// Errors from writing one `git.json`.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The output directory or file could not be created or written.
    #[error("failed to write '{path}': {source}")]
    WriteError {
        /// The directory or file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The record could not be rendered as JSON.
    #[error("failed to serialize git info: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Collects metadata for one repository context.
pub struct Collector {
    runner: Box<dyn CommandRunner>,
    git_binary: PathBuf,
    work_dir: PathBuf,
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("git_binary", &self.git_binary)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Collector {
    /// A collector that runs real processes.
    ///
    /// # Errors
    ///
    /// Fails only if the context has no working directory and the process
    /// working directory cannot be determined.
    pub fn new(ctx: &Context) -> std::io::Result<Self> {
        Ok(Self::with_runner(ctx.working_dir()?, &ctx.git_binary, SystemRunner))
    }

    /// A collector with a custom process runner.
    pub fn with_runner(
        work_dir: PathBuf,
        git_binary: &Path,
        runner: impl CommandRunner + 'static,
    ) -> Self {
        Self {
            runner: Box::new(runner),
            git_binary: git_binary.to_path_buf(),
            work_dir,
        }
    }

    /// Run every query and return the record without writing it.
    pub fn snapshot(&self) -> GitInfo {
        let git = Git::new(self.runner.as_ref(), &self.git_binary, &self.work_dir);
        debug!(work_dir = %self.work_dir.display(), "collecting git metadata");

        let closest_tag = git.closest_tag();
        let committer_time = git.committer_time();

        GitInfo {
            branch: git.branch(),
            build_host: host::hostname(),
            build_time: host::build_time_now(),
            build_user_email: git.config_user_email(),
            build_user_name: git.config_user_name(),
            build_version: BUILD_VERSION.to_string(),
            closest_tag_commit_count: closest_tag.clone(),
            closest_tag_name: closest_tag,
            commit_author_time: git.author_time(),
            commit_committer_time: committer_time.clone(),
            commit_id: git.commit_id(),
            commit_id_abbrev: git.commit_id_abbrev(),
            commit_id_describe: git.describe(),
            commit_id_describe_short: git.describe_short(),
            commit_message_full: escape_newlines(&git.message_full()),
            commit_message_short: git.message_short(),
            commit_time: committer_time,
            commit_user_email: git.author_email(),
            commit_user_name: git.author_name(),
            dirty: bool_value(git.is_dirty()),
            local_branch_ahead: git.ahead_of_upstream(),
            local_branch_behind: git.behind_upstream(),
            remote_origin_url: git.origin_url(),
            tags: git.tags_at_head(),
            total_commit_count: git.total_commit_count(),
        }
    }

    /// Write `git.json` into `output_dir`, returning the absolute file path.
    ///
    /// A relative `output_dir` is taken relative to the repository context.
    /// Missing parent directories are created and an existing file is
    /// replaced.
    ///
    /// # Errors
    ///
    /// [`CollectorError::WriteError`] if the directory cannot be created or
    /// the file cannot be written. Query failures are never errors.
    pub fn collect(&self, output_dir: &Path) -> Result<PathBuf, CollectorError> {
        let dir = self.resolve_output_dir(output_dir);
        fs::create_dir_all(&dir).map_err(|source| CollectorError::WriteError {
            path: dir.clone(),
            source,
        })?;

        let json = self.snapshot().to_json_pretty()?;

        let path = dir.join(OUTPUT_FILE);
        fs::write(&path, json).map_err(|source| CollectorError::WriteError {
            path: path.clone(),
            source,
        })?;

        let absolute = fs::canonicalize(&path).unwrap_or(path);
        info!(path = %absolute.display(), "wrote git info");
        Ok(absolute)
    }

    fn resolve_output_dir(&self, output_dir: &Path) -> PathBuf {
        if output_dir.is_absolute() {
            output_dir.to_path_buf()
        } else {
            self.work_dir.join(output_dir)
        }
    }
}
