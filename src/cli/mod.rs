//! cli
//!
//! Command-line interface layer for git-json.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Initialise logging
//! - Build the [`engine::Context`] and hand off to the engine
//! - Report written files and failures to the operator
//!
//! # Exit status
//!
//! `run` returns an error (and the binary exits non-zero) if any target
//! directory could not be written. All targets are attempted first.

pub mod args;

pub use args::Cli;

use crate::engine::{self, Collector};
use crate::ui::output::{self, Verbosity};
use anyhow::{bail, Context as _, Result};
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd,
        git_binary: cli.git_binary,
        manifest: cli.manifest,
        debug: cli.debug,
        quiet: cli.quiet,
    };
    init_tracing(ctx.debug);

    generate(&ctx, cli.package_path)
}

/// Write `git.json` into the explicit directory or every configured default.
pub fn generate(ctx: &engine::Context, package_path: Option<std::path::PathBuf>) -> Result<()> {
    let verbosity = Verbosity::from_quiet(ctx.quiet);
    let work_dir = ctx
        .working_dir()
        .context("Failed to determine working directory")?;

    let targets = engine::resolve_targets(ctx, &work_dir, package_path)
        .context("Failed to load configuration")?;
    let collector = Collector::new(ctx).context("Failed to set up collector")?;

    let summary = engine::run_targets(&collector, &targets);

    for path in &summary.written {
        output::print(format!("Generated git info: {}", path.display()), verbosity);
    }
    for failure in &summary.failures {
        output::error(&failure.error);
    }

    if !summary.is_success() {
        bail!(
            "failed to write git info to {} of {} output director{}",
            summary.failures.len(),
            targets.dirs().len(),
            if targets.dirs().len() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr. `RUST_LOG` overrides the default level; `--debug`
/// raises this crate to `debug` on top of it.
fn init_tracing(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref(), debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the log filter from an optional `RUST_LOG` value and `--debug`.
fn log_filter(rust_log: Option<&str>, debug: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("git_json=warn"));

    if !debug {
        return filter;
    }
    match "git_json=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn default_filter_is_warn() {
        let filter = log_filter(None, false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn debug_flag_raises_default_filter() {
        let filter = log_filter(None, true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn debug_flag_applies_on_top_of_rust_log() {
        let filter = log_filter(Some("error"), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(filter.to_string().contains("git_json=debug"));
    }

    #[test]
    fn rust_log_is_honoured_without_debug() {
        let filter = log_filter(Some("info"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn invalid_rust_log_falls_back_to_default() {
        let filter = log_filter(Some("git_json=notalevel"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
