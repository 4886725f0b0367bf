//! core
//!
//! Core domain types and configuration for git-json.
//!
//! # Modules
//!
//! - [`record`] - The `git.json` record and its fixed key set
//! - [`config`] - Default output directories from the project manifest
//! - [`host`] - Build host name and build time

pub mod config;
pub mod host;
pub mod record;
