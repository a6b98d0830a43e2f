//! Error types for workspace discovery, caching, and the CLI surface.

use thiserror::Error;

/// Failure while asking the package manager about its workspaces.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected workspace listing output: {0}")]
    UnexpectedShape(String),

    #[error("Invalid JSON in workspace listing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while reading the root project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure in the persistent key-value cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache database error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Failed to encode or decode cache value for {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to callers of the inspector and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cannot find {0} installed!")]
    ToolNotInstalled(String),

    #[error("Cannot find workspaces!")]
    NoWorkspacesFound,

    #[error("Cannot find selected workspace {0}!")]
    UnknownWorkspace(String),

    #[error("Cyclic workspace dependency: {}", .chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    #[error("Workspace discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
