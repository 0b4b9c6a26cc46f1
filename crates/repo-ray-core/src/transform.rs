//! The listing → graph transform

use crate::config::TransformConfig;
use crate::error::Result;
use crate::filter::filter_entries;
use crate::hierarchy::{node_label, Hierarchy};
use crate::listing::Listing;
use crate::model::*;
use crate::render::render_mermaid;

/// Build the graph for a listing.
///
/// Filtering runs first, then the first `cap` filtered entries are placed. Whatever
/// the cap leaves out is summarised by one overflow node hanging off the root with a
/// dashed edge; its count is relative to the filtered total. Empty listings and
/// listings that filter down to nothing yield the root alone.
pub fn transform(listing: &Listing, config: &TransformConfig) -> TransformResult {
    let cap = config.cap_for(listing.mode);
    let filtered = filter_entries(&listing.entries);

    let split_paths = listing.mode == ListingMode::Hierarchical;
    let placed = Hierarchy::new(&config.root_label, config.icons, cap, split_paths)
        .build(filtered.iter().take(cap).copied())
        .finish();

    let mut nodes = placed.nodes;
    let mut edges = placed.edges;
    let mut issues = Vec::new();
    if listing.upstream_truncated {
        tracing::warn!("Upstream listing was truncated before it reached us");
        issues.push(DataQualityIssue::UpstreamTruncated);
    }
    issues.extend(placed.issues);

    let omitted = filtered.len() - placed.placed;
    if omitted > 0 {
        let overflow = NodeId::overflow();
        nodes.push(GraphNode {
            id: overflow.clone(),
            label: node_label(&format!("Other entries: {omitted}"), ShapeKind::Overflow, config.icons),
            shape: ShapeKind::Overflow,
            path: String::new(),
        });
        edges.push(GraphEdge {
            from: NodeId::root(),
            to: overflow,
            style: EdgeStyle::Dashed,
        });
    }

    let stats = TransformStats {
        listed: listing.entries.len(),
        filtered: filtered.len(),
        placed: placed.placed,
        omitted,
    };
    tracing::info!(
        "Transformed {:?} listing: {} listed, {} after filtering, {} placed, {} omitted",
        listing.mode,
        stats.listed,
        stats.filtered,
        stats.placed,
        stats.omitted
    );

    TransformResult {
        mode: listing.mode,
        nodes,
        edges,
        stats,
        issues,
    }
}

/// Parse a JSON listing and transform it.
pub fn transform_json(input: &str, config: &TransformConfig) -> Result<TransformResult> {
    let listing = Listing::from_json(input)?;
    Ok(transform(&listing, config))
}

/// Parse, transform and render a JSON listing in one call.
pub fn visualize_json(input: &str, config: &TransformConfig) -> Result<String> {
    let result = transform_json(input, config)?;
    Ok(render_mermaid(&result, config.direction))
}
