//! Workspace-scoped path configuration.

pub mod storage_paths;
