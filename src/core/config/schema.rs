//! core::config::schema
//!
//! Manifest schema types.
//!
//! # Where the settings live
//!
//! The `git-json` table can sit in any of three places, checked in order:
//!
//! ```toml
//! # Cargo.toml, single crate
//! [package.metadata.git-json]
//! path = "resources"
//!
//! # Cargo.toml, workspace root
//! [workspace.metadata.git-json]
//! path = ["crates/app/resources", "crates/cli/resources"]
//!
//! # pyproject.toml
//! [tool.git-json]
//! path = "resources"
//! ```
//!
//! Only the `git-json` table itself is strict about unknown fields; the rest
//! of the manifest is ignored.

use std::path::PathBuf;

use serde::Deserialize;

/// The parts of a project manifest this tool reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Manifest {
    /// `[package]` (Cargo.toml)
    pub package: Option<MetadataHolder>,

    /// `[workspace]` (Cargo.toml)
    pub workspace: Option<MetadataHolder>,

    /// `[tool]` (pyproject.toml)
    pub tool: Option<ToolTables>,
}

impl Manifest {
    /// The first `git-json` table present, in lookup order.
    pub fn settings(&self) -> Option<&Settings> {
        metadata_settings(self.package.as_ref())
            .or_else(|| metadata_settings(self.workspace.as_ref()))
            .or_else(|| self.tool.as_ref()?.git_json.as_ref())
    }
}

fn metadata_settings(holder: Option<&MetadataHolder>) -> Option<&Settings> {
    holder?.metadata.as_ref()?.git_json.as_ref()
}

/// A table that may carry a `metadata` sub-table (`[package]`, `[workspace]`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadataHolder {
    pub metadata: Option<ToolTables>,
}

/// A table keyed by tool name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolTables {
    #[serde(rename = "git-json")]
    pub git_json: Option<Settings>,
}

/// The `git-json` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output directory or directories.
    pub path: Option<PathSetting>,
}

/// `path = "dir"` or `path = ["a", "b"]`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PathSetting {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathSetting {
    /// The configured directories, in order.
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            PathSetting::One(path) => vec![path],
            PathSetting::Many(paths) => paths,
        }
    }
}
