//! git
//!
//! Single interface for all Git queries.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Every repository read flows
//! through [`Git`], which shells out to the `git` executable with an explicit
//! argument vector. Nothing here ever writes to the repository.
//!
//! # Responsibilities
//!
//! - Running external commands through the [`CommandRunner`] seam
//! - The per-query fallback policy (failed query → fallback value)
//! - One method per metadata query
//!
//! # Invariants
//!
//! - No query goes through a shell
//! - No query returns an error; failures become fallback values
//! - Every query runs in the working directory the handle was built with
//!
//! # Example
//!
//! ```no_run
//! use git_json::git::{Git, SystemRunner};
//! use std::path::Path;
//!
//! let git = Git::new(&SystemRunner, Path::new("git"), Path::new("."));
//! let branch = git.branch();
//! let dirty = git.is_dirty();
//! ```

mod interface;
mod runner;

#[cfg(test)]
pub(crate) mod fake;

pub use interface::{Git, COMMIT_DATE_FORMAT};
pub use runner::{CommandOutput, CommandRunner, GitError, SystemRunner};
