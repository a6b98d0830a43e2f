//! Workspace domain: discovery, command catalogs, selection, and the dependency tree.

mod catalog;
mod facade;
pub mod format;
mod registry;
mod selection;
mod tree;

pub use catalog::CommandCatalogCache;
pub use facade::Inspector;
pub use registry::WorkspaceRegistry;
pub use selection::{SelectionManager, SELECTED_COMMANDS_KEY, SELECTED_WORKSPACE_KEY};
pub use tree::DependencyTreeBuilder;
