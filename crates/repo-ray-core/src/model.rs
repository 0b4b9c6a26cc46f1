//! Core data structures for the listing graph

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an upstream listing says an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything the upstream reports that we don't recognise (symlinks, submodules, ...).
    Unknown,
}

/// A single entry from a repository listing.
///
/// In flat mode `path` is a bare basename. In hierarchical mode it is a
/// `/`-joined sequence of segments such as `src/utils/helpers.ts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl ListingEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        ListingEntry {
            path: path.into(),
            kind,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Last non-empty segment of the path.
    pub fn basename(&self) -> &str {
        self.segments().last().unwrap_or("")
    }
}

/// Which of the two listing shapes produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    Flat,
    Hierarchical,
}

/// Identifier of a node in the output graph grammar.
///
/// Always non-empty and made only of ASCII alphanumerics and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub const ROOT: &'static str = "ROOT";
    pub const OVERFLOW: &'static str = "OVERFLOW";

    pub fn root() -> Self {
        NodeId(Self::ROOT.to_string())
    }

    pub fn overflow() -> Self {
        NodeId(Self::OVERFLOW.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    // ── Synthetic ───────────────────────────────────────────
    Root,
    Overflow,

    // ── Containers ──────────────────────────────────────────
    Directory,

    // ── Files ───────────────────────────────────────────────
    ConfigFile,
    DocFile,
    GenericFile,
}

impl ShapeKind {
    /// Icon prefixed to labels when icons are enabled.
    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Root => "📦",
            ShapeKind::Overflow => "➕",
            ShapeKind::Directory => "📁",
            ShapeKind::ConfigFile => "⚙️",
            ShapeKind::DocFile => "📝",
            ShapeKind::GenericFile => "📄",
        }
    }

    /// True for nodes that stand for a listing entry rather than a synthetic marker.
    pub fn is_entry(self) -> bool {
        !matches!(self, ShapeKind::Root | ShapeKind::Overflow)
    }
}

/// A single node in the output graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Human-readable label, possibly prefixed with an icon.
    pub label: String,
    pub shape: ShapeKind,
    /// Accumulated listing path this node stands for. Empty for synthetic nodes.
    pub path: String,
}

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeStyle {
    /// Containment: parent directory (or root) to child.
    Solid,
    /// Root to the overflow marker.
    Dashed,
}

/// A directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub style: EdgeStyle,
}

/// Conditions in the input that were degraded rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// The same path appears both as a file and as a directory.
    AmbiguousPath { path: String },
    /// The upstream listing says it was cut short before we saw it.
    UpstreamTruncated,
    /// Two distinct paths derived the same identifier; the later one was suffixed.
    IdentifierCollision { path: String, id: NodeId },
}

/// Counters describing one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Entries in the raw listing.
    pub listed: usize,
    /// Entries that survived filtering.
    pub filtered: usize,
    /// Filtered entries that were placed into the graph.
    pub placed: usize,
    /// Filtered entries that were left out by the cap.
    pub omitted: usize,
}

/// Output of one transform run: nodes and edges in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub mode: ListingMode,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub stats: TransformStats,
    pub issues: Vec<DataQualityIssue>,
}

impl TransformResult {
    /// The synthetic root node. A transform always produces one; a result built
    /// by hand or deserialized may not.
    pub fn root(&self) -> Option<&GraphNode> {
        self.node(&NodeId::root())
    }

    /// The overflow marker, if the cap cut anything off.
    pub fn overflow(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.shape == ShapeKind::Overflow)
    }

    /// Nodes that stand for listing entries (no root, no overflow marker).
    pub fn entry_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.shape.is_entry())
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Find the node for an accumulated listing path.
    pub fn node_for_path(&self, path: &str) -> Option<&GraphNode> {
        self.entry_nodes().find(|n| n.path == path)
    }

    /// Edges leaving `from`, in discovery order.
    pub fn children_of<'a>(&'a self, from: &'a NodeId) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| &e.from == from)
    }
}
