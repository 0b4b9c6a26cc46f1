//! Structural checks over a transform result, backed by petgraph::StableDiGraph

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use thiserror::Error;

use crate::model::*;

/// A way a result can fail to be a well-formed diagram tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("no root node")]
    MissingRoot,

    #[error("node id {0} is declared more than once")]
    DuplicateId(NodeId),

    #[error("edge {from} -> {to} references an undeclared node")]
    DanglingEdge { from: NodeId, to: NodeId },

    #[error("root node has an incoming edge")]
    RootHasParent,

    #[error("node {id} has {count} parents, expected exactly one")]
    ParentCount { id: NodeId, count: usize },

    #[error("graph contains a cycle")]
    Cycle,

    #[error("{count} entry nodes exceed the cap of {cap}")]
    CapExceeded { count: usize, cap: usize },
}

/// The result's nodes and edges loaded into a directed graph.
pub struct DiagramGraph {
    inner: StableDiGraph<NodeId, EdgeStyle>,
    index: HashMap<NodeId, NodeIndex>,
    violations: Vec<InvariantViolation>,
}

impl std::fmt::Debug for DiagramGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagramGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl DiagramGraph {
    /// Load a result. Duplicate ids and dangling edges are recorded, not loaded.
    pub fn from_result(result: &TransformResult) -> Self {
        let mut inner = StableDiGraph::new();
        let mut index = HashMap::new();
        let mut violations = Vec::new();

        for node in &result.nodes {
            if index.contains_key(&node.id) {
                violations.push(InvariantViolation::DuplicateId(node.id.clone()));
                continue;
            }
            let idx = inner.add_node(node.id.clone());
            index.insert(node.id.clone(), idx);
        }

        for edge in &result.edges {
            match (index.get(&edge.from), index.get(&edge.to)) {
                (Some(&from), Some(&to)) => {
                    inner.add_edge(from, to, edge.style);
                }
                _ => violations.push(InvariantViolation::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                }),
            }
        }

        DiagramGraph {
            inner,
            index,
            violations,
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// The single parent of a node, if it has one.
    pub fn parent(&self, id: &NodeId) -> Option<&NodeId> {
        let idx = *self.index.get(id)?;
        self.inner
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .and_then(|p| self.inner.node_weight(p))
    }

    /// Number of incoming edges to a node.
    pub fn parent_count(&self, id: &NodeId) -> usize {
        self.index.get(id).map_or(0, |&idx| {
            self.inner.neighbors_directed(idx, Direction::Incoming).count()
        })
    }

    /// Children of a node, in no particular order.
    pub fn children(&self, id: &NodeId) -> Vec<&NodeId> {
        self.index.get(id).map_or_else(Vec::new, |&idx| {
            self.inner
                .neighbors_directed(idx, Direction::Outgoing)
                .filter_map(|c| self.inner.node_weight(c))
                .collect()
        })
    }

    /// Every node reachable by walking parent edges upward.
    pub fn ancestors(&self, id: &NodeId) -> HashSet<NodeId> {
        let mut ancestors = HashSet::new();
        let Some(&start) = self.index.get(id) else {
            return ancestors;
        };
        let mut to_visit = vec![start];

        while let Some(current) = to_visit.pop() {
            for parent in self.inner.neighbors_directed(current, Direction::Incoming) {
                if let Some(parent_id) = self.inner.node_weight(parent) {
                    if ancestors.insert(parent_id.clone()) {
                        to_visit.push(parent);
                    }
                }
            }
        }

        ancestors
    }

    /// Check the tree invariants: unique ids, no dangling edges, a parentless root,
    /// exactly one parent for everything else, no cycles.
    pub fn violations(&self) -> Vec<InvariantViolation> {
        let mut violations = self.violations.clone();
        let root = NodeId::root();

        match self.index.get(&root) {
            None => violations.push(InvariantViolation::MissingRoot),
            Some(_) if self.parent_count(&root) > 0 => {
                violations.push(InvariantViolation::RootHasParent)
            }
            Some(_) => {}
        }

        for (id, &idx) in &self.index {
            if *id == root {
                continue;
            }
            let count = self.inner.neighbors_directed(idx, Direction::Incoming).count();
            if count != 1 {
                violations.push(InvariantViolation::ParentCount {
                    id: id.clone(),
                    count,
                });
            }
        }

        if is_cyclic_directed(&self.inner) {
            violations.push(InvariantViolation::Cycle);
        }

        violations
    }
}

/// Check a result against the tree invariants and the entry-node cap.
pub fn check_invariants(result: &TransformResult, cap: usize) -> Vec<InvariantViolation> {
    let mut violations = DiagramGraph::from_result(result).violations();

    let count = result.entry_nodes().count();
    if count > cap {
        violations.push(InvariantViolation::CapExceeded { count, cap });
    }

    violations
}
