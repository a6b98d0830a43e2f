//! Yarnspace: Monorepo Workspace Inspection
//!
//! Discovers the workspaces a package manager reports, caches a selected
//! workspace with its runnable commands, and renders the inverted dependency
//! tree of the repository.

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod manifest;
pub mod tooling;
pub mod types;
pub mod workspace;
