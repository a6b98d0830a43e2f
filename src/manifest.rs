//! Root Manifest Reader
//!
//! Reads the project's top-level `package.json` once and exposes the names it
//! depends on, so workspaces the root depends on show the root pseudo-node as
//! a dependent.

use crate::error::ManifestError;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Pseudo-node name used when the manifest has no name or cannot be read.
pub const UNNAMED_ROOT: &str = "package.json (root)";

/// The parts of the root manifest the dependency tree needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootManifest {
    /// `"<name> (root)"`, or [`UNNAMED_ROOT`]
    pub display_name: String,
    /// Names from dependencies, devDependencies, optionalDependencies,
    /// bundledDependencies, in that order. Duplicates are kept.
    pub dependencies: Vec<String>,
}

impl RootManifest {
    /// Manifest stand-in with no name and no dependencies.
    pub fn unnamed() -> Self {
        Self {
            display_name: UNNAMED_ROOT.to_string(),
            dependencies: Vec::new(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ManifestError> {
        let manifest: PackageManifest = serde_json::from_str(data)?;
        let display_name = match manifest.name.as_ref().and_then(display_label) {
            Some(name) => format!("{} (root)", name),
            None => UNNAMED_ROOT.to_string(),
        };
        let dependencies = [
            manifest.dependencies,
            manifest.dev_dependencies,
            manifest.optional_dependencies,
            manifest.bundled_dependencies,
        ]
        .into_iter()
        .flatten()
        .flat_map(DependencySection::into_names)
        .collect();
        Ok(Self {
            display_name,
            dependencies,
        })
    }

    /// Whether the root manifest declares `name` in any dependency section.
    pub fn lists(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }
}

/// Label for a `name` field of any JSON type. Empty, zero, false, and null
/// names fall back to [`UNNAMED_ROOT`].
fn display_label(name: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match name {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(name.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    name: Option<serde_json::Value>,
    #[serde(default)]
    dependencies: Option<DependencySection>,
    #[serde(default)]
    dev_dependencies: Option<DependencySection>,
    #[serde(default)]
    optional_dependencies: Option<DependencySection>,
    #[serde(default, alias = "bundleDependencies")]
    bundled_dependencies: Option<DependencySection>,
}

/// A dependency section: a name -> version map, or a plain name list (the
/// bundled form). `true` means "bundle everything" and names nothing. Any
/// other shape is ignored rather than failing the whole manifest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependencySection {
    Map(IndexMap<String, serde_json::Value>),
    List(Vec<String>),
    Flag(bool),
    Unrecognized(serde_json::Value),
}

impl DependencySection {
    fn into_names(self) -> Vec<String> {
        match self {
            DependencySection::Map(map) => map.into_keys().collect(),
            DependencySection::List(names) => names,
            DependencySection::Flag(_) | DependencySection::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Memoizing reader: the manifest is read at most once, and a failed read is
/// remembered as [`RootManifest::unnamed`].
pub struct ManifestReader {
    path: PathBuf,
    cached: RwLock<Option<Arc<RootManifest>>>,
}

impl ManifestReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: RwLock::new(None),
        }
    }

    pub fn root_manifest(&self) -> Arc<RootManifest> {
        if let Some(manifest) = self.cached.read().as_ref() {
            return Arc::clone(manifest);
        }
        let manifest = Arc::new(RootManifest::read(&self.path).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "root manifest unavailable");
            RootManifest::unnamed()
        }));
        *self.cached.write() = Some(Arc::clone(&manifest));
        manifest
    }

    /// Root dependency names, in section order.
    pub fn dependencies(&self) -> Vec<String> {
        self.root_manifest().dependencies.clone()
    }
}
