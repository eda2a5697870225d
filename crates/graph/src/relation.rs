//! Relation graph representation
//!
//! An ephemeral in-memory graph whose nodes are papers (and, in the
//! author-aware variant, authors) and whose edges carry one or more relation
//! labels. Ordered maps back the node and edge sets, so the final graph is
//! independent of insertion order and iteration is deterministic for layout.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use paperscope_common::models::PaperRecord;

/// Signal that produced an edge
///
/// Declaration order is the fixed display priority: the first relation
/// present on an edge decides its color, and labels are joined in this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Shared authorship between two papers
    Authors,
    /// Same non-empty publisher
    Publisher,
    /// Same non-empty ranking
    Ranking,
    /// Intersecting keyword sets
    Keyword,
    /// Explicit citation, citing -> cited
    Citation,
    /// Two authors credited on the same paper
    Coauthor,
    /// Author -> paper credit
    Authorship,
}

impl RelationKind {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Authors => "authors",
            RelationKind::Publisher => "publisher",
            RelationKind::Ranking => "ranking",
            RelationKind::Keyword => "keyword",
            RelationKind::Citation => "citation",
            RelationKind::Coauthor => "coauthor",
            RelationKind::Authorship => "authorship",
        }
    }

    /// Edge color for this relation
    pub fn color(&self) -> &'static str {
        match self {
            RelationKind::Authors => "#FF5733",
            RelationKind::Publisher => "#9D33FF",
            RelationKind::Ranking => "#33FF57",
            RelationKind::Keyword => "#33A1FF",
            RelationKind::Citation => "#FFB633",
            RelationKind::Coauthor => "#FF33A8",
            RelationKind::Authorship => "#8D6E63",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Namespaced node identity
///
/// Paper and author keys live in separate namespaces, so an author whose
/// name equals a paper title can never collide with that paper's node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeId {
    Paper(String),
    Author(String),
}

impl NodeId {
    pub fn paper(title: impl Into<String>) -> Self {
        NodeId::Paper(title.into())
    }

    pub fn author(name: impl Into<String>) -> Self {
        NodeId::Author(name.into())
    }

    /// The raw key inside the namespace
    pub fn key(&self) -> &str {
        match self {
            NodeId::Paper(k) | NodeId::Author(k) => k,
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Paper(k) => write!(f, "paper:{k}"),
            NodeId::Author(k) => write!(f, "author:{k}"),
        }
    }
}

/// Node kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Paper,
    Author,
}

/// Graph node with the attributes the tooltip needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    pub kind: NodeKind,

    /// Display label source (title for papers, name for authors)
    pub label: String,

    pub authors: Vec<String>,

    pub keywords: BTreeSet<String>,

    pub publisher: Option<String>,

    pub ranking: Option<String>,

    /// Created for a referenced-but-not-loaded paper; carries no attributes
    pub placeholder: bool,
}

impl Node {
    /// Paper node from a corpus record
    pub fn paper(id: NodeId, record: &PaperRecord) -> Self {
        Self {
            id,
            kind: NodeKind::Paper,
            label: record.title.clone(),
            authors: record.authors.clone(),
            keywords: record.keywords.clone(),
            publisher: record.publisher.clone(),
            ranking: record.ranking.clone(),
            placeholder: false,
        }
    }

    /// Placeholder paper node for a cited title absent from the corpus
    pub fn placeholder(id: NodeId, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: NodeKind::Paper,
            label: title.into(),
            authors: Vec::new(),
            keywords: BTreeSet::new(),
            publisher: None,
            ranking: None,
            placeholder: true,
        }
    }

    /// Author node
    pub fn author(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: NodeKind::Author,
            label: name.into(),
            authors: Vec::new(),
            keywords: BTreeSet::new(),
            publisher: None,
            ranking: None,
            placeholder: false,
        }
    }
}

/// Edge between two nodes, labeled with every signal that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,

    pub target: NodeId,

    /// Relation labels in priority order; never empty
    pub relations: BTreeSet<RelationKind>,
}

impl Edge {
    /// Comma-joined relation labels in priority order
    pub fn label(&self) -> String {
        self.relations
            .iter()
            .map(RelationKind::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// In-memory relation graph
///
/// Built fresh from the current filtered subset on every visualization
/// request; never mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<(NodeId, NodeId), Edge>,
}

impl RelationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node
    ///
    /// A placeholder never overwrites a real node; a real node replaces a
    /// placeholder created earlier for the same id.
    pub fn insert_node(&mut self, node: Node) {
        match self.nodes.get(&node.id) {
            Some(existing) if node.placeholder && !existing.placeholder => {}
            _ => {
                self.nodes.insert(node.id.clone(), node);
            }
        }
    }

    /// Add a relation between two nodes, merging into an existing edge
    ///
    /// Self edges are ignored. A second signal for the same (source, target)
    /// pair extends the relation set instead of adding a parallel edge.
    pub fn link(&mut self, source: &NodeId, target: &NodeId, kind: RelationKind) {
        if source == target {
            return;
        }
        self.edges
            .entry((source.clone(), target.clone()))
            .or_insert_with(|| Edge {
                source: source.clone(),
                target: target.clone(),
                relations: BTreeSet::new(),
            })
            .relations
            .insert(kind);
    }

    /// Add a symmetric relation stored under the canonical key order
    pub fn link_undirected(&mut self, a: &NodeId, b: &NodeId, kind: RelationKind) {
        if a <= b {
            self.link(a, b, kind);
        } else {
            self.link(b, a, kind);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in key order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in key order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// The edge between two nodes in this direction, if any
    pub fn edge_between(&self, source: &NodeId, target: &NodeId) -> Option<&Edge> {
        self.edges.get(&(source.clone(), target.clone()))
    }
}

/// Maps raw strings from the corpus to node identities
///
/// The default keeps the source's string-keyed identity (same trimmed
/// string, same entity); a future disambiguation step can be substituted
/// without touching the builders.
pub trait IdentityResolver {
    fn paper_id(&self, title: &str) -> NodeId;

    fn author_id(&self, name: &str) -> NodeId;
}

/// Trim-only string identity
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimmedStringIdentity;

impl IdentityResolver for TrimmedStringIdentity {
    fn paper_id(&self, title: &str) -> NodeId {
        NodeId::paper(title.trim())
    }

    fn author_id(&self, name: &str) -> NodeId {
        NodeId::author(name.trim())
    }
}
