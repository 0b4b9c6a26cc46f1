//! Hierarchy reconstruction
//!
//! Each entry's path is walked segment by segment. Every accumulated prefix that has
//! not been seen yet becomes one node and one edge from its parent prefix; prefixes
//! already seen are reused as parents. Intermediate directories therefore exist even
//! when the listing never names them, and every node ends up with exactly one parent.
//!
//! The whole pass is a fold: a [`Hierarchy`] is moved into [`Hierarchy::place`] and
//! handed back, so no state outlives a single transform call.

use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use crate::classify::shape_for;
use crate::identifier::{sanitize_label, IdRegistry};
use crate::model::*;

/// What a seen prefix was first discovered as.
#[derive(Debug, Clone)]
struct Seen {
    id: NodeId,
    is_file: bool,
}

/// Accumulator for one reconstruction pass.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    root: NodeId,
    split_paths: bool,
    icons: bool,
    /// Max number of entry nodes (root and overflow excluded).
    node_budget: usize,
    seen: HashMap<String, Seen>,
    flagged: HashSet<String>,
    registry: IdRegistry,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    issues: Vec<DataQualityIssue>,
    placed: usize,
}

/// Everything a finished pass produced.
#[derive(Debug, Clone)]
pub struct PlacedHierarchy {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub issues: Vec<DataQualityIssue>,
    /// Entries consumed by the pass.
    pub placed: usize,
}

/// Label for a node, with the shape's icon when enabled.
pub fn node_label(name: &str, shape: ShapeKind, icons: bool) -> String {
    if icons {
        format!("{} {}", shape.icon(), name)
    } else {
        name.to_string()
    }
}

impl Hierarchy {
    /// Start a pass holding only the synthetic root, seeded as the empty prefix.
    ///
    /// With `split_paths` off (flat listings) every entry path is one segment.
    pub fn new(root_label: &str, icons: bool, node_budget: usize, split_paths: bool) -> Self {
        let root = NodeId::root();
        let mut seen = HashMap::new();
        seen.insert(
            String::new(),
            Seen {
                id: root.clone(),
                is_file: false,
            },
        );

        Hierarchy {
            nodes: vec![GraphNode {
                id: root.clone(),
                label: node_label(root_label, ShapeKind::Root, icons),
                shape: ShapeKind::Root,
                path: String::new(),
            }],
            root,
            split_paths,
            icons,
            node_budget,
            seen,
            flagged: HashSet::new(),
            registry: IdRegistry::new(),
            edges: Vec::new(),
            issues: Vec::new(),
            placed: 0,
        }
    }

    /// Number of entry nodes created so far.
    pub fn entry_node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Place one entry. Breaks, unchanged, when the entry's new nodes would not fit
    /// in the node budget.
    pub fn place(mut self, entry: &ListingEntry) -> ControlFlow<Self, Self> {
        let segments: Vec<&str> = if self.split_paths {
            entry.segments().collect()
        } else if entry.path.is_empty() {
            Vec::new()
        } else {
            vec![entry.path.as_str()]
        };
        if segments.is_empty() {
            return ControlFlow::Continue(self);
        }

        let prefixes = accumulate(&segments);
        let fresh = prefixes
            .iter()
            .filter(|p| !self.seen.contains_key(p.as_str()))
            .count();
        if self.entry_node_count() + fresh > self.node_budget {
            tracing::debug!(
                "Node budget {} reached at {}, stopping",
                self.node_budget,
                entry.path
            );
            return ControlFlow::Break(self);
        }

        let last = segments.len() - 1;
        let mut parent = self.root.clone();
        for (i, (segment, prefix)) in segments.iter().zip(prefixes).enumerate() {
            let is_leaf = i == last;
            let wants_file = is_leaf && entry.kind != EntryKind::Directory;

            if let Some(seen) = self.seen.get(&prefix) {
                let conflict = (seen.is_file && !is_leaf) || (is_leaf && seen.is_file != wants_file);
                parent = seen.id.clone();
                if conflict {
                    self.flag_ambiguous(&prefix);
                }
                continue;
            }

            let shape = if wants_file {
                shape_for(entry.kind, segment)
            } else {
                ShapeKind::Directory
            };
            let (id, issue) = self.registry.claim(&prefix);
            self.issues.extend(issue);

            tracing::trace!("Placing {} as {:?}", prefix, shape);
            self.nodes.push(GraphNode {
                id: id.clone(),
                label: node_label(&sanitize_label(segment), shape, self.icons),
                shape,
                path: prefix.clone(),
            });
            self.edges.push(GraphEdge {
                from: parent,
                to: id.clone(),
                style: EdgeStyle::Solid,
            });
            self.seen.insert(
                prefix,
                Seen {
                    id: id.clone(),
                    is_file: wants_file,
                },
            );
            parent = id;
        }

        self.placed += 1;
        ControlFlow::Continue(self)
    }

    /// Fold every entry into a fresh pass, stopping at the first that doesn't fit.
    pub fn build<'a>(self, entries: impl IntoIterator<Item = &'a ListingEntry>) -> Self {
        match entries.into_iter().try_fold(self, Hierarchy::place) {
            ControlFlow::Continue(done) | ControlFlow::Break(done) => done,
        }
    }

    pub fn finish(self) -> PlacedHierarchy {
        PlacedHierarchy {
            nodes: self.nodes,
            edges: self.edges,
            issues: self.issues,
            placed: self.placed,
        }
    }

    /// First discovery keeps its shape; the conflict is reported once per path.
    fn flag_ambiguous(&mut self, path: &str) {
        if self.flagged.insert(path.to_string()) {
            tracing::warn!("{} appears as both a file and a directory", path);
            self.issues.push(DataQualityIssue::AmbiguousPath {
                path: path.to_string(),
            });
        }
    }
}

/// `["src", "utils", "a.ts"]` -> `["src", "src/utils", "src/utils/a.ts"]`.
fn accumulate(segments: &[&str]) -> Vec<String> {
    let mut prefix = String::new();
    segments
        .iter()
        .map(|segment| {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            prefix.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(entries: &[ListingEntry], budget: usize) -> PlacedHierarchy {
        Hierarchy::new("repo", false, budget, true)
            .build(entries.iter())
            .finish()
    }

    fn paths(placed: &PlacedHierarchy) -> Vec<&str> {
        placed.nodes.iter().map(|n| n.path.as_str()).collect()
    }

    #[test]
    fn test_accumulate() {
        assert_eq!(
            accumulate(&["src", "utils", "a.ts"]),
            vec!["src", "src/utils", "src/utils/a.ts"]
        );
    }

    #[test]
    fn test_implicit_directories() {
        let placed = build(&[ListingEntry::file("src/utils/helpers.ts")], 50);

        assert_eq!(paths(&placed), vec!["", "src", "src/utils", "src/utils/helpers.ts"]);
        assert_eq!(placed.nodes[1].shape, ShapeKind::Directory);
        assert_eq!(placed.nodes[2].shape, ShapeKind::Directory);
        assert_eq!(placed.nodes[3].shape, ShapeKind::GenericFile);
        assert_eq!(placed.edges.len(), 3);
        assert_eq!(placed.edges[0].from, NodeId::root());
        assert_eq!(placed.edges[1].from, placed.nodes[1].id);
        assert_eq!(placed.edges[2].from, placed.nodes[2].id);
    }

    #[test]
    fn test_shared_ancestors_are_reused() {
        let placed = build(
            &[
                ListingEntry::file("src/a.ts"),
                ListingEntry::dir("src"),
                ListingEntry::file("src/b.ts"),
            ],
            50,
        );

        assert_eq!(paths(&placed), vec!["", "src", "src/a.ts", "src/b.ts"]);
        assert_eq!(placed.edges.len(), 3);
        assert_eq!(placed.placed, 3);
        assert!(placed.issues.is_empty());
    }

    #[test]
    fn test_order_independent_structure() {
        let forward = build(
            &[ListingEntry::dir("src"), ListingEntry::file("src/a.ts")],
            50,
        );
        let backward = build(
            &[ListingEntry::file("src/a.ts"), ListingEntry::dir("src")],
            50,
        );
        assert_eq!(forward.nodes, backward.nodes);
        assert_eq!(forward.edges, backward.edges);
    }

    #[test]
    fn test_ambiguous_path_first_discovery_wins() {
        let placed = build(
            &[
                ListingEntry::file("docs"),
                ListingEntry::file("docs/guide.md"),
                ListingEntry::dir("docs"),
            ],
            50,
        );

        let docs = &placed.nodes[1];
        assert_eq!(docs.shape, ShapeKind::GenericFile);
        // The child still hangs off the existing node.
        assert_eq!(placed.edges[1].from, docs.id);
        assert_eq!(
            placed.issues,
            vec![DataQualityIssue::AmbiguousPath {
                path: "docs".to_string()
            }]
        );
    }

    #[test]
    fn test_blob_after_implicit_directory_is_ambiguous() {
        let placed = build(
            &[ListingEntry::file("lib/x.rs"), ListingEntry::file("lib")],
            50,
        );
        assert_eq!(placed.nodes[1].shape, ShapeKind::Directory);
        assert_eq!(placed.issues.len(), 1);
    }

    #[test]
    fn test_budget_stops_before_overflowing() {
        let placed = build(
            &[
                ListingEntry::file("a.rs"),
                ListingEntry::file("deep/nested/b.rs"),
                ListingEntry::file("c.rs"),
            ],
            3,
        );

        // "deep/nested/b.rs" needs three nodes but only two are left.
        assert_eq!(paths(&placed), vec!["", "a.rs"]);
        assert_eq!(placed.placed, 1);
    }

    #[test]
    fn test_flat_paths_are_not_split() {
        let placed = Hierarchy::new("repo", false, 10, false)
            .build([ListingEntry::file("weird/name")].iter())
            .finish();
        assert_eq!(paths(&placed), vec!["", "weird/name"]);
        assert_eq!(placed.nodes[1].label, "weirdname");
    }

    #[test]
    fn test_icons_in_labels() {
        let placed = Hierarchy::new("repo", true, 10, true)
            .build([ListingEntry::file("src/README.md")].iter())
            .finish();
        assert_eq!(placed.nodes[0].label, "📦 repo");
        assert_eq!(placed.nodes[1].label, "📁 src");
        assert_eq!(placed.nodes[2].label, "📝 README.md");
    }
}
