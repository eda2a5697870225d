//! Presentation-layer export
//!
//! Pure read of a relation graph plus its computed positions into the
//! node/edge lists an external force-directed renderer consumes, plus the
//! fixed physics options block passed through unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use paperscope_common::config::{DisplayConfig, LayoutConfig};
use paperscope_common::errors::Result;

use crate::layout::Position;
use crate::relation::{Edge, Node, NodeId, NodeKind, RelationGraph};

/// Marker appended to truncated labels
const ELLIPSIS: &str = "...";

/// Renderer-facing node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,

    /// Truncated display label
    pub label: String,

    /// Tooltip text with the full, untruncated title
    pub title: String,

    pub x: f32,

    pub y: f32,

    pub color: String,

    pub shape: String,
}

/// Renderer-facing edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisEdge {
    pub source: String,

    pub target: String,

    /// Tooltip text
    pub title: String,

    /// Comma-joined relation labels
    pub label: String,

    pub color: String,
}

/// Complete payload for the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<VisNode>,

    pub edges: Vec<VisEdge>,

    pub physics: PhysicsOptions,
}

impl GraphView {
    /// Assemble the renderer payload from a graph and its positions
    ///
    /// Nodes without a computed position default to the origin, which can
    /// only happen if the caller laid out a different graph.
    pub fn assemble(
        graph: &RelationGraph,
        positions: &BTreeMap<NodeId, Position>,
        display: &DisplayConfig,
        layout: &LayoutConfig,
    ) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let (x, y) = positions.get(&node.id).copied().unwrap_or((0.0, 0.0));
                VisNode {
                    id: node.id.to_string(),
                    label: truncate_label(&node.label, display.label_max_chars),
                    title: node_tooltip(node),
                    x,
                    y,
                    color: match node.kind {
                        NodeKind::Paper => display.paper_color.clone(),
                        NodeKind::Author => display.author_color.clone(),
                    },
                    shape: match node.kind {
                        NodeKind::Paper => display.paper_shape.clone(),
                        NodeKind::Author => display.author_shape.clone(),
                    },
                }
            })
            .collect();

        let edges = graph
            .edges()
            .map(|edge| {
                let label = edge.label();
                VisEdge {
                    source: edge.source.to_string(),
                    target: edge.target.to_string(),
                    title: format!("Relation: {label}"),
                    label,
                    color: edge_color(edge, display),
                }
            })
            .collect();

        Self {
            nodes,
            edges,
            physics: PhysicsOptions::from_layout(layout),
        }
    }

    /// Serialize the payload for the rendering surface
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Cap a label at `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut label: String = text.chars().take(max_chars).collect();
    label.push_str(ELLIPSIS);
    label
}

/// Color by the first relation present in priority order
fn edge_color(edge: &Edge, display: &DisplayConfig) -> String {
    edge.relations
        .iter()
        .next()
        .map(|kind| kind.color().to_string())
        .unwrap_or_else(|| display.default_edge_color.clone())
}

/// Multi-line tooltip carrying the node's full attributes
fn node_tooltip(node: &Node) -> String {
    match node.kind {
        NodeKind::Author => format!("Author: {}", node.label),
        NodeKind::Paper => {
            let authors = node.authors.join(", ");
            let keywords = node
                .keywords
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let publisher = node.publisher.as_deref().unwrap_or("");
            let ranking = node.ranking.as_deref().unwrap_or("");
            format!(
                "{}\nAuthors: {}\nKeywords: {}\nPublisher: {} ({})",
                node.label, authors, keywords, publisher, ranking
            )
        }
    }
}

/// Physics configuration handed to the rendering surface unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsOptions {
    pub physics: PhysicsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBlock {
    pub enabled: bool,

    pub solver: String,

    #[serde(rename = "forceAtlas2Based")]
    pub force_atlas2_based: ForceAtlas2Options,

    #[serde(rename = "maxVelocity")]
    pub max_velocity: f32,

    pub stabilization: StabilizationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceAtlas2Options {
    pub gravitational_constant: f32,

    pub central_gravity: f32,

    pub spring_length: f32,

    pub spring_constant: f32,

    pub damping: f32,

    pub avoid_overlap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilizationOptions {
    pub enabled: bool,

    pub iterations: usize,

    pub update_interval: usize,
}

impl PhysicsOptions {
    /// Mirror the layout constants into the renderer's physics block
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self {
            physics: PhysicsBlock {
                enabled: true,
                solver: "forceAtlas2Based".to_string(),
                force_atlas2_based: ForceAtlas2Options {
                    gravitational_constant: layout.repulsion,
                    central_gravity: 0.01,
                    spring_length: layout.spring_length,
                    spring_constant: layout.spring_constant,
                    damping: layout.damping,
                    avoid_overlap: 1.0,
                },
                max_velocity: layout.max_step,
                stabilization: StabilizationOptions {
                    enabled: true,
                    iterations: layout.max_iterations,
                    update_interval: 25,
                },
            },
        }
    }
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self::from_layout(&LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_paper_graph, build_scholar_graph};
    use crate::layout::layout;
    use paperscope_common::models::PaperRecord;

    fn corpus() -> Vec<PaperRecord> {
        vec![
            PaperRecord {
                authors: vec!["X".into(), "Y".into()],
                keywords: ["nlp".to_string()].into(),
                publisher: Some("ACM".into()),
                ranking: Some("A*".into()),
                ..PaperRecord::new("A Very Long Paper Title About Graphs")
            },
            PaperRecord {
                authors: vec!["Y".into()],
                keywords: ["nlp".to_string()].into(),
                ..PaperRecord::new("B")
            },
        ]
    }

    fn view() -> GraphView {
        let graph = build_paper_graph(&corpus());
        let display = DisplayConfig::default();
        let layout_config = LayoutConfig::default();
        let positions = layout(&graph, layout_config.seed, &layout_config);
        GraphView::assemble(&graph, &positions, &display, &layout_config)
    }

    #[test]
    fn test_label_truncated_tooltip_keeps_full_title() {
        let view = view();
        let node = view
            .nodes
            .iter()
            .find(|n| n.id.starts_with("paper:A Very"))
            .unwrap();

        assert_eq!(node.label, "A Very Long Pap...");
        assert!(node.title.starts_with("A Very Long Paper Title About Graphs\n"));
        assert!(node.title.contains("Authors: X, Y"));
        assert!(node.title.contains("Publisher: ACM (A*)"));
    }

    #[test]
    fn test_short_label_untouched() {
        assert_eq!(truncate_label("short", 15), "short");
        assert_eq!(truncate_label("exactly-15-char", 15), "exactly-15-char");
    }

    #[test]
    fn test_edge_color_follows_priority() {
        let view = view();
        // The A-B edge is an authors edge; authors outranks everything.
        let edge = &view.edges[0];
        assert_eq!(edge.label, "authors");
        assert_eq!(edge.color, "#FF5733");
        assert_eq!(edge.title, "Relation: authors");
    }

    #[test]
    fn test_author_nodes_styled_separately() {
        let graph = build_scholar_graph(&corpus());
        let display = DisplayConfig::default();
        let layout_config = LayoutConfig::default();
        let positions = layout(&graph, layout_config.seed, &layout_config);
        let view = GraphView::assemble(&graph, &positions, &display, &layout_config);

        let author = view.nodes.iter().find(|n| n.id == "author:Y").unwrap();
        assert_eq!(author.shape, display.author_shape);
        assert_eq!(author.color, display.author_color);
        assert_eq!(author.title, "Author: Y");
    }

    #[test]
    fn test_physics_block_serialization() {
        let json = serde_json::to_value(PhysicsOptions::default()).unwrap();
        let atlas = &json["physics"]["forceAtlas2Based"];

        assert_eq!(json["physics"]["solver"], "forceAtlas2Based");
        assert_eq!(atlas["gravitationalConstant"], -100.0);
        assert_eq!(atlas["springLength"], 100.0);
        assert_eq!(json["physics"]["stabilization"]["iterations"], 1000);
        assert_eq!(json["physics"]["maxVelocity"], 50.0);
    }

    #[test]
    fn test_view_round_trips_as_json() {
        let view = view();
        let json = view.to_json().unwrap();
        let back: GraphView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
