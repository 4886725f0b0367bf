//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--package-path` / `-p <DIR>`: write only into this directory
//! - `--cwd <DIR>`: run as if started in that directory
//! - `--git <PATH>`: git executable to use
//! - `--manifest <FILE>`: read default directories from this file
//! - `--debug`: enable debug logging
//! - `--quiet` / `-q`: minimal output

use clap::Parser;
use std::path::PathBuf;

/// git-json - Snapshot git metadata into a flat git.json
#[derive(Parser, Debug)]
#[command(name = "git-json")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Write into the configured directories (or ./resources)
    git-json

    # Write into one directory
    git-json --package-path build/meta

CONFIGURATION:
    Default directories are read from the `path` key of, in order:
        Cargo.toml      [package.metadata.git-json] or [workspace.metadata.git-json]
        pyproject.toml  [tool.git-json]
    `path` may be a string or an array of strings.")]
pub struct Cli {
    /// Output directory for git.json (default: from manifest, else `resources`)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub package_path: Option<PathBuf>,

    /// Run as if git-json was started in this directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Git executable to invoke
    #[arg(long = "git", value_name = "PATH", default_value = "git")]
    pub git_binary: PathBuf,

    /// Manifest to read default output directories from
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
