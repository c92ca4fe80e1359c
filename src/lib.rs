//! dna installer library.
//!
//! This crate provides the provisioning logic behind the `dna-installer`
//! CLI: it idempotently creates the `~/.dna` directory tree, fetches the
//! `dna` package-manager CLI from a configured registry, installs it as an
//! executable, seeds the persisted mesh configuration on first run, and
//! ensures the user's interactive shell finds the binary on PATH.
//!
//! # Modules
//!
//! - [`artifact`] - Source priority, atomic placement, permission bits
//! - [`cli`] - Command-line argument definitions
//! - [`dirs`] - Directory resolution abstraction
//! - [`error`] - Semantic error types with recovery hints
//! - [`fetch`] - HTTP retrieval behind an injectable trait
//! - [`layout`] - User and system filesystem layouts
//! - [`outcome`] - Idempotent step outcomes
//! - [`output`] - User-facing messages and the dry-run report
//! - [`ownership`] - Elevation detection and ownership transfer
//! - [`persisted`] - First-run-only mesh configuration
//! - [`pipeline`] - The linear provisioning sequence
//! - [`profile`] - Shell detection and resource-file selection
//! - [`rcfile`] - Guarded PATH-export appends
//! - [`settings`] - Defaults, environment, and CLI flag resolution
//! - [`wrapper`] - Wrapper script generation for global installs

pub mod artifact;
pub mod cli;
pub mod dirs;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod outcome;
pub mod output;
pub mod ownership;
pub mod persisted;
pub mod pipeline;
pub mod profile;
pub mod rcfile;
pub mod settings;
pub mod wrapper;
