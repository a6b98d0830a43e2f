//! External Process Gateway
//!
//! Talks to the package manager: version check, workspace listing, and
//! per-workspace command listing. Output parsing lives in [`parse`] so it can
//! be exercised without a subprocess.

pub mod contract;
pub mod parse;
pub mod process;

pub use contract::WorkspaceGateway;
pub use parse::{parse_command_listing, parse_workspace_listing, ListingShape};
pub use process::ProcessGateway;
