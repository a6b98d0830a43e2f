//! Dependency Tree Builder
//!
//! Inverts the "A depends on B" relation reported per workspace into a tree
//! where each node's children are its dependents. Roots are workspaces with no
//! declared dependencies. The root manifest appears as a pseudo-node under
//! every workspace it depends on.

use crate::error::ApiError;
use crate::manifest::RootManifest;
use crate::types::{DependencyTree, WorkspaceInfo};

pub struct DependencyTreeBuilder<'a> {
    workspaces: &'a WorkspaceInfo,
    root: &'a RootManifest,
}

impl<'a> DependencyTreeBuilder<'a> {
    pub fn new(workspaces: &'a WorkspaceInfo, root: &'a RootManifest) -> Self {
        Self { workspaces, root }
    }

    /// Workspaces with no declared dependencies, in discovery order.
    pub fn roots(&self) -> Vec<&'a str> {
        self.workspaces
            .iter()
            .filter(|(_, record)| record.is_root())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Nodes that directly depend on `name`: workspaces in discovery order,
    /// then the root pseudo-node.
    pub fn direct_dependents(&self, name: &str) -> Vec<String> {
        let mut dependents: Vec<String> = self
            .workspaces
            .iter()
            .filter(|(_, record)| record.depends_on(name))
            .map(|(dependent, _)| dependent.clone())
            .collect();
        if self.root.lists(name) {
            dependents.push(self.root.display_name.clone());
        }
        dependents
    }

    /// Everything depending on `name`, nested. `None` when nothing does.
    ///
    /// Fails with [`ApiError::CyclicDependency`] when a node depends on one of
    /// its own dependents.
    pub fn dependents_of(&self, name: &str) -> Result<Option<DependencyTree>, ApiError> {
        let mut path = Vec::new();
        self.walk(name, &mut path)
    }

    /// Full tree keyed by root workspaces. `None` when there are no roots.
    pub fn build(&self) -> Result<Option<DependencyTree>, ApiError> {
        let roots = self.roots();
        if roots.is_empty() {
            return Ok(None);
        }
        let mut tree = DependencyTree::new();
        for root in roots {
            tree.insert(root.to_string(), self.dependents_of(root)?);
        }
        Ok(Some(tree))
    }

    // `path` holds the ancestors of `name` on the current branch.
    fn walk(&self, name: &str, path: &mut Vec<String>) -> Result<Option<DependencyTree>, ApiError> {
        if path.iter().any(|ancestor| ancestor == name) {
            let mut chain = path.clone();
            chain.push(name.to_string());
            return Err(ApiError::CyclicDependency { chain });
        }

        let dependents = self.direct_dependents(name);
        if dependents.is_empty() {
            return Ok(None);
        }

        path.push(name.to_string());
        let mut tree = DependencyTree::new();
        for dependent in dependents {
            let nested = self.walk(&dependent, path)?;
            tree.insert(dependent, nested);
        }
        path.pop();
        Ok(Some(tree))
    }
}
