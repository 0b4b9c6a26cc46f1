//! Repo-Ray Core: repository listing to diagram graph transform

pub mod model;
pub mod error;
pub mod config;
pub mod listing;
pub mod filter;
pub mod identifier;
pub mod classify;
pub mod hierarchy;
pub mod transform;
pub mod render;
pub mod graph;


#[cfg(test)]
pub mod test_utils;

pub use model::{EntryKind, ListingEntry, ListingMode, NodeId, ShapeKind, EdgeStyle, GraphNode, GraphEdge, DataQualityIssue, TransformStats, TransformResult};
pub use error::{Result, TransformError};
pub use config::{Direction, TransformConfig, DEFAULT_FLAT_CAP, DEFAULT_TREE_CAP};
pub use listing::Listing;
pub use filter::{decide, filter_entries, FilterDecision};
pub use identifier::{derive_identifier, sanitize_label, IdRegistry};
pub use classify::{classify_file, shape_for};
pub use transform::{transform, transform_json, visualize_json};
pub use render::render_mermaid;
pub use graph::{check_invariants, DiagramGraph, InvariantViolation};
