//! PaperScope Graph Library
//!
//! Derives relationship graphs from a filtered paper subset and prepares
//! them for an external force-directed renderer:
//! - In-memory relation graph keyed by namespaced node identity
//! - Builders for the paper-only, author+paper, and citation-table variants
//! - Deterministic seeded spring layout
//! - Presentation export (labels, tooltips, per-relation colors, physics
//!   options passthrough)
//!
//! A graph is rebuilt from scratch on every filter change and holds no
//! identity beyond the current render cycle.

pub mod builder;
pub mod layout;
pub mod relation;
pub mod view;

pub use builder::{
    build_citation_graph, build_paper_graph, build_paper_keyword_graph, build_scholar_graph,
};
pub use layout::{layout, Position};
pub use relation::{
    Edge, IdentityResolver, Node, NodeId, NodeKind, RelationGraph, RelationKind,
    TrimmedStringIdentity,
};
pub use view::{GraphView, PhysicsOptions, VisEdge, VisNode};
