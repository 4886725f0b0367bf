//! core::config
//!
//! Default output directories, read from the project manifest.
//!
//! # Precedence
//!
//! Output directories are resolved in this order (earlier wins):
//! 1. `--package-path` on the command line (not handled here)
//! 2. The `git-json` table of the project manifest
//! 3. The built-in default, `resources`
//!
//! # Manifest Locations
//!
//! Searched in the working directory, in order, first `git-json` table wins:
//! 1. `Cargo.toml` (`[package.metadata.git-json]`, then `[workspace.metadata.git-json]`)
//! 2. `pyproject.toml` (`[tool.git-json]`)
//!
//! A manifest passed explicitly replaces the search.
//!
//! # Failure policy
//!
//! A searched manifest that cannot be read or parsed never stops a build: it
//! produces a [`ConfigWarning`] and the default applies. Only an explicitly
//! named manifest that cannot be read is an error.
//!
//! # Example
//!
//! ```no_run
//! use git_json::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("."), None).unwrap();
//! for dir in result.config.output_dirs() {
//!     println!("would write {}", dir.display());
//! }
//! ```

pub mod schema;

pub use schema::{Manifest, PathSetting, Settings};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output directory used when nothing is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "resources";

/// Manifest file names searched, in order.
pub const MANIFEST_FILES: [&str; 2] = ["Cargo.toml", "pyproject.toml"];

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolved default output directories.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    output_dirs: Vec<PathBuf>,
    /// Manifest the directories came from, if any
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dirs: vec![PathBuf::from(DEFAULT_OUTPUT_DIR)],
            source: None,
        }
    }
}

impl Config {
    /// Load configuration for the project rooted at `dir`.
    ///
    /// If `manifest` is given, only that file is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] only when an explicit `manifest`
    /// cannot be read. Every other problem is a warning.
    pub fn load(dir: &Path, manifest: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let config = match manifest {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    dir.join(path)
                };
                let contents =
                    fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
                        path: path.clone(),
                        source,
                    })?;
                Self::from_manifest_str(&path, &contents, &mut warnings)
            }
            None => Self::search(dir, &mut warnings),
        };

        Ok(ConfigLoadResult {
            config: config.unwrap_or_default(),
            warnings,
        })
    }

    /// Try each manifest in [`MANIFEST_FILES`] until one has settings.
    fn search(dir: &Path, warnings: &mut Vec<ConfigWarning>) -> Option<Config> {
        for name in MANIFEST_FILES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(source) => {
                    let err = ConfigError::ReadError {
                        path: path.clone(),
                        source,
                    };
                    warnings.push(ConfigWarning {
                        message: format!("{}; ignoring it", err),
                        path,
                    });
                    continue;
                }
            };

            if let Some(config) = Self::from_manifest_str(&path, &contents, warnings) {
                return Some(config);
            }
        }
        None
    }

    /// Extract settings from manifest text.
    ///
    /// Returns `None` (possibly with a warning) when the manifest has no
    /// usable `git-json` table.
    fn from_manifest_str(
        path: &Path,
        contents: &str,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Option<Config> {
        let manifest: Manifest = match Self::parse_manifest(path, contents) {
            Ok(manifest) => manifest,
            Err(err) => {
                warnings.push(ConfigWarning {
                    message: format!("{}; using default output directory", err),
                    path: path.to_path_buf(),
                });
                return None;
            }
        };

        let dirs = manifest.settings()?.path.clone()?.into_paths();
        if dirs.is_empty() {
            warnings.push(ConfigWarning {
                message: "git-json path list is empty; using default output directory"
                    .to_string(),
                path: path.to_path_buf(),
            });
            return None;
        }

        Some(Config {
            output_dirs: dirs,
            source: Some(path.to_path_buf()),
        })
    }

    fn parse_manifest(path: &Path, contents: &str) -> Result<Manifest, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Directories to write `git.json` into when none is given explicitly.
    ///
    /// Never empty.
    pub fn output_dirs(&self) -> &[PathBuf] {
        &self.output_dirs
    }

    /// The manifest the directories were read from, or `None` for the
    /// built-in default.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
