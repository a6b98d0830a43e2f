//! Tooling & Integration Layer
//!
//! Command-line surface over the workspace inspector.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
