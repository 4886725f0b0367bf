//! git-json - Snapshot git metadata into a flat `git.json`
//!
//! git-json runs a fixed set of read-only `git` queries against a checkout
//! and writes the answers as one flat JSON object, for embedding build
//! provenance (branch, commit, tags, dirty state, build host and time) into
//! artifacts.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Target resolution and the collector
//! - [`core`] - The record type, manifest configuration, host facts
//! - [`git`] - Single interface for all Git queries
//! - [`ui`] - Operator output
//!
//! # Invariants
//!
//! 1. The repository is only ever read
//! 2. Every record has the same fixed key set, all string values
//! 3. A failed query degrades to a fallback value, never an error
//! 4. A failed output directory never prevents the others from being written

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
