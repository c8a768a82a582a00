//! Lineage graph derived from the manifest
//!
//! Forward and reverse adjacency over models and sources, for dependency
//! queries like "what feeds this model" and "what breaks if it changes".

use std::collections::{HashMap, HashSet, VecDeque};

use crate::manifest::Manifest;

/// Node identifier (unique_id from the manifest)
pub type NodeId = String;

/// Dependency adjacency in both directions
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    /// node -> nodes it depends on
    parents: HashMap<NodeId, Vec<NodeId>>,

    /// node -> nodes that depend on it
    children: HashMap<NodeId, Vec<NodeId>>,

    nodes: HashSet<NodeId>,
}

impl LineageGraph {
    /// Build the graph from a manifest.
    ///
    /// Prefers the manifest's own `parent_map`/`child_map`; when a manifest
    /// omits them, edges fall back to each node's `depends_on` list.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut graph = Self::default();

        if !manifest.parent_map.is_empty() || !manifest.child_map.is_empty() {
            for (node_id, parent_ids) in &manifest.parent_map {
                graph.nodes.insert(node_id.clone());
                for parent_id in parent_ids {
                    graph.nodes.insert(parent_id.clone());
                }
                graph.parents.insert(node_id.clone(), parent_ids.clone());
            }

            for (node_id, child_ids) in &manifest.child_map {
                graph.nodes.insert(node_id.clone());
                for child_id in child_ids {
                    graph.nodes.insert(child_id.clone());
                }
                graph.children.insert(node_id.clone(), child_ids.clone());
            }
        } else {
            for (node_id, node) in &manifest.nodes {
                graph.nodes.insert(node_id.clone());

                for dep_id in &node.depends_on.nodes {
                    graph.nodes.insert(dep_id.clone());
                    graph
                        .parents
                        .entry(node_id.clone())
                        .or_default()
                        .push(dep_id.clone());
                    graph
                        .children
                        .entry(dep_id.clone())
                        .or_default()
                        .push(node_id.clone());
                }
            }

            for source_id in manifest.sources.keys() {
                graph.nodes.insert(source_id.clone());
            }
        }

        graph
    }

    /// Every node the graph knows about
    pub fn all_nodes(&self) -> Vec<&NodeId> {
        self.nodes.iter().collect()
    }

    /// Immediate dependencies of a node
    pub fn parents(&self, node_id: &str) -> Vec<&NodeId> {
        self.parents
            .get(node_id)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// Immediate dependents of a node
    pub fn children(&self, node_id: &str) -> Vec<&NodeId> {
        self.children
            .get(node_id)
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }

    /// Transitive closure of parents (everything feeding this node)
    pub fn upstream(&self, node_id: &str) -> Vec<NodeId> {
        bfs(&self.parents, node_id)
    }

    /// Transitive closure of children (everything this node feeds)
    pub fn downstream(&self, node_id: &str) -> Vec<NodeId> {
        bfs(&self.children, node_id)
    }
}

/// Breadth-first walk over one adjacency direction, start node excluded
fn bfs(edges: &HashMap<NodeId, Vec<NodeId>>, start: &str) -> Vec<NodeId> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut result = Vec::new();

    if let Some(next) = edges.get(start) {
        queue.extend(next.iter().map(String::as_str));
    }

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        result.push(current.to_string());

        if let Some(next) = edges.get(current) {
            for id in next {
                if !visited.contains(id.as_str()) {
                    queue.push_back(id);
                }
            }
        }
    }

    result
}
