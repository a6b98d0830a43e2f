//! Config merge: default layer and source orchestration.

pub mod policy;
pub mod service;
