//! Mermaid serialization of a transform result

use std::fmt::Write;

use crate::config::Direction;
use crate::model::*;

const ROOT_STYLE: &str = "fill:#f9f,stroke:#333,stroke-width:4px";
const OVERFLOW_STYLE: &str = "stroke-dasharray: 5 5";

/// Render a result as a Mermaid flowchart.
///
/// Statements come out in a fixed order: header, node declarations, edges, styles.
/// Nodes and edges keep discovery order, so identical input renders byte-for-byte
/// identically.
pub fn render_mermaid(result: &TransformResult, direction: Direction) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "graph {direction}");

    for node in &result.nodes {
        let _ = writeln!(out, "    {}", node_statement(node));
    }

    for edge in &result.edges {
        let arrow = match edge.style {
            EdgeStyle::Solid => "-->",
            EdgeStyle::Dashed => "-.->",
        };
        let _ = writeln!(out, "    {} {} {}", edge.from, arrow, edge.to);
    }

    if let Some(root) = result.root() {
        let _ = writeln!(out, "    style {} {}", root.id, ROOT_STYLE);
    }
    if let Some(overflow) = result.overflow() {
        let _ = writeln!(out, "    style {} {}", overflow.id, OVERFLOW_STYLE);
    }

    out
}

fn node_statement(node: &GraphNode) -> String {
    let label = escape_label(&node.label);
    match node.shape {
        ShapeKind::Root | ShapeKind::Directory | ShapeKind::Overflow => {
            format!("{}[\"{}\"]", node.id, label)
        }
        ShapeKind::ConfigFile | ShapeKind::GenericFile => format!("{}(\"{}\")", node.id, label),
        ShapeKind::DocFile => format!("{}>\"{}\"]", node.id, label),
    }
}

/// Quotes are the one thing that can break out of a quoted Mermaid label.
fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}
