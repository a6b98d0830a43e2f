//! Core types shared by the registry, catalog, and tree builder.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// WorkspaceName: identifier of a workspace, unique within a run
pub type WorkspaceName = String;

/// CommandCatalog: runnable script names for one workspace, in listing order
pub type CommandCatalog = Vec<String>;

/// WorkspaceInfo: every discovered workspace, in the order the tool reported them
pub type WorkspaceInfo = IndexMap<WorkspaceName, WorkspaceRecord>;

/// Metadata the package manager reports for a single workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Intra-repo workspaces this workspace depends on
    #[serde(default, deserialize_with = "nullable_list")]
    pub workspace_dependencies: Vec<WorkspaceName>,

    #[serde(default, deserialize_with = "nullable_list")]
    pub mismatched_workspace_dependencies: Vec<WorkspaceName>,
}

impl WorkspaceRecord {
    /// A workspace with no declared dependencies roots the dependency tree.
    pub fn is_root(&self) -> bool {
        self.workspace_dependencies.is_empty()
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.workspace_dependencies.iter().any(|dep| dep == name)
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inverted dependency view: each node maps to the nodes depending on it.
///
/// `None` marks a node nothing depends on. Serializes as nested JSON objects
/// with `null` leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyTree(pub IndexMap<String, Option<DependencyTree>>);

impl DependencyTree {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, name: String, dependents: Option<DependencyTree>) {
        self.0.insert(name, dependents);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<DependencyTree>)> {
        self.0.iter()
    }

    /// Every (parent, child) pair in the tree, depth-first.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        collect_edges(self, &mut edges);
        edges
    }
}

fn collect_edges(tree: &DependencyTree, edges: &mut Vec<(String, String)>) {
    for (parent, children) in tree.iter() {
        if let Some(children) = children {
            for (child, _) in children.iter() {
                edges.push((parent.clone(), child.clone()));
            }
            collect_edges(children, edges);
        }
    }
}
