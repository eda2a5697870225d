//! Relation graph builders
//!
//! Three variants over an immutable snapshot:
//! - [`build_paper_graph`]: paper-only pairwise relations (authors,
//!   publisher, ranking) over a filtered subset
//! - [`build_scholar_graph`]: author+paper graph over the full corpus
//!   (authorship, coauthorship, citations with placeholders, keyword
//!   overlap)
//! - [`build_citation_graph`]: directed citations from the id-joined
//!   secondary tables
//!
//! Every builder returns a fresh graph; an empty input yields an empty
//! graph, never an error. The pairwise passes are O(n²) in subset size;
//! narrowing before building is the caller's contract.

use std::collections::BTreeMap;

use tracing::debug;

use paperscope_common::models::{CitationLink, CitationPaper, PaperRecord};

use crate::relation::{
    IdentityResolver, Node, NodeId, RelationGraph, RelationKind, TrimmedStringIdentity,
};

/// Build the paper-only relation graph for a filtered subset
pub fn build_paper_graph(subset: &[PaperRecord]) -> RelationGraph {
    build_paper_graph_with(subset, &TrimmedStringIdentity, false)
}

/// Paper-only variant that also treats keyword overlap as a relation
///
/// The extra signal merges into the same pairwise edge's label set; it
/// never produces a parallel edge.
pub fn build_paper_keyword_graph(subset: &[PaperRecord]) -> RelationGraph {
    build_paper_graph_with(subset, &TrimmedStringIdentity, true)
}

/// Paper-only variant with an explicit identity resolver
pub fn build_paper_graph_with(
    subset: &[PaperRecord],
    identity: &impl IdentityResolver,
    keyword_overlap: bool,
) -> RelationGraph {
    let papers = dedupe_by_title(subset, identity);

    let mut graph = RelationGraph::new();
    for (id, record) in &papers {
        graph.insert_node(Node::paper(id.clone(), record));
    }

    // Pairwise comparison over the filtered subset
    let entries: Vec<(&NodeId, &&PaperRecord)> = papers.iter().collect();
    for (i, (id_a, paper_a)) in entries.iter().enumerate() {
        for (id_b, paper_b) in entries.iter().skip(i + 1) {
            if !paper_a.shared_authors(paper_b).is_empty() {
                graph.link_undirected(id_a, id_b, RelationKind::Authors);
            }
            if both_equal(&paper_a.publisher, &paper_b.publisher) {
                graph.link_undirected(id_a, id_b, RelationKind::Publisher);
            }
            if both_equal(&paper_a.ranking, &paper_b.ranking) {
                graph.link_undirected(id_a, id_b, RelationKind::Ranking);
            }
            if keyword_overlap && paper_a.shares_keyword(paper_b) {
                graph.link_undirected(id_a, id_b, RelationKind::Keyword);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "paper graph built"
    );
    graph
}

/// Build the author+paper graph over the full corpus
pub fn build_scholar_graph(corpus: &[PaperRecord]) -> RelationGraph {
    build_scholar_graph_with(corpus, &TrimmedStringIdentity)
}

/// Author+paper variant with an explicit identity resolver
pub fn build_scholar_graph_with(
    corpus: &[PaperRecord],
    identity: &impl IdentityResolver,
) -> RelationGraph {
    let papers = dedupe_by_title(corpus, identity);

    let mut graph = RelationGraph::new();
    for (id, record) in &papers {
        graph.insert_node(Node::paper(id.clone(), record));
    }

    // Authorship and coauthorship
    for (paper_id, record) in &papers {
        let mut author_ids: Vec<NodeId> = record
            .authors
            .iter()
            .map(|name| identity.author_id(name))
            .collect();
        author_ids.sort();
        author_ids.dedup();

        for author_id in &author_ids {
            let name = author_id.key().to_string();
            graph.insert_node(Node::author(author_id.clone(), name));
            graph.link(author_id, paper_id, RelationKind::Authorship);
        }

        // Symmetric coauthor edges, added in both directions
        for (i, a) in author_ids.iter().enumerate() {
            for b in author_ids.iter().skip(i + 1) {
                graph.link(a, b, RelationKind::Coauthor);
                graph.link(b, a, RelationKind::Coauthor);
            }
        }
    }

    // Citations; unknown cited titles become placeholder paper nodes so the
    // reference is still visualized without fabricating detail
    for (paper_id, record) in &papers {
        for cited_title in &record.cited_papers {
            let cited_id = identity.paper_id(cited_title);
            if cited_id == *paper_id {
                continue;
            }
            if !graph.contains(&cited_id) {
                graph.insert_node(Node::placeholder(cited_id.clone(), cited_title.trim()));
            }
            graph.link(paper_id, &cited_id, RelationKind::Citation);
        }
    }

    // Symmetric keyword-overlap edges between distinct papers
    let entries: Vec<(&NodeId, &&PaperRecord)> = papers.iter().collect();
    for (i, (id_a, paper_a)) in entries.iter().enumerate() {
        for (id_b, paper_b) in entries.iter().skip(i + 1) {
            if paper_a.shares_keyword(paper_b) {
                graph.link(id_a, id_b, RelationKind::Keyword);
                graph.link(id_b, id_a, RelationKind::Keyword);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "scholar graph built"
    );
    graph
}

/// Build the directed citation graph from the id-joined secondary tables
///
/// A citation row is kept only when both endpoints are loaded papers; the
/// placeholder rule applies to the title-list variant, not this one.
pub fn build_citation_graph(papers: &[CitationPaper], links: &[CitationLink]) -> RelationGraph {
    let mut graph = RelationGraph::new();
    let mut ids: BTreeMap<&str, NodeId> = BTreeMap::new();

    for paper in papers {
        let id = NodeId::paper(&paper.paper_id);
        ids.insert(paper.paper_id.as_str(), id.clone());
        graph.insert_node(Node {
            id: id.clone(),
            kind: crate::relation::NodeKind::Paper,
            label: paper.title.clone(),
            authors: paper.authors.clone(),
            keywords: paper.keywords.clone(),
            publisher: None,
            ranking: None,
            placeholder: false,
        });
    }

    for link in links {
        let (Some(source), Some(target)) = (
            ids.get(link.source_id.as_str()),
            ids.get(link.target_id.as_str()),
        ) else {
            debug!(
                source = %link.source_id,
                target = %link.target_id,
                "dropping citation with unknown endpoint"
            );
            continue;
        };
        graph.link(source, target, RelationKind::Citation);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "citation graph built"
    );
    graph
}

/// Map titles to records, last row winning on duplicates
fn dedupe_by_title<'a>(
    records: &'a [PaperRecord],
    identity: &impl IdentityResolver,
) -> BTreeMap<NodeId, &'a PaperRecord> {
    let mut papers = BTreeMap::new();
    for record in records {
        papers.insert(identity.paper_id(&record.title), record);
    }
    papers
}

/// Both present and equal
fn both_equal(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperscope_common::models::{CitationLink, CitationPaper};

    fn paper(title: &str, authors: &[&str], keywords: &[&str]) -> PaperRecord {
        PaperRecord {
            authors: authors.iter().map(|a| a.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..PaperRecord::new(title)
        }
    }

    fn abc_corpus() -> Vec<PaperRecord> {
        vec![
            paper("A", &["X", "Y"], &["nlp"]),
            paper("B", &["Y", "Z"], &["nlp", "vision"]),
            paper("C", &["W"], &["vision"]),
        ]
    }

    #[test]
    fn test_empty_subset_builds_empty_graph() {
        let graph = build_paper_graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_paper_graph_shared_author_edge() {
        let graph = build_paper_graph(&abc_corpus());

        assert_eq!(graph.node_count(), 3);
        // A-B share author Y with different publishers/rankings: exactly {authors}
        let edge = graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("B"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Authors].into());
        // B-C share nothing the paper-only builder looks at
        assert!(graph
            .edge_between(&NodeId::paper("B"), &NodeId::paper("C"))
            .is_none());
    }

    #[test]
    fn test_paper_graph_relation_union_single_edge() {
        let mut a = paper("A", &["X"], &[]);
        a.publisher = Some("ACM".into());
        a.ranking = Some("A*".into());
        let mut b = paper("B", &["X"], &[]);
        b.publisher = Some("ACM".into());
        b.ranking = Some("B".into());

        let graph = build_paper_graph(&[a, b]);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("B"))
            .unwrap();
        assert_eq!(
            edge.relations,
            [RelationKind::Authors, RelationKind::Publisher].into()
        );
        assert_eq!(edge.label(), "authors, publisher");
    }

    #[test]
    fn test_keyword_aware_variant_merges_into_one_edge() {
        let graph = build_paper_keyword_graph(&abc_corpus());

        // A-B: shared author Y and shared keyword "nlp", one edge
        let edge = graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("B"))
            .unwrap();
        assert_eq!(
            edge.relations,
            [RelationKind::Authors, RelationKind::Keyword].into()
        );

        // B-C: no shared author, but shared keyword "vision"; this edge
        // exists only in the keyword-aware variant
        let edge = graph
            .edge_between(&NodeId::paper("B"), &NodeId::paper("C"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Keyword].into());
        assert!(build_paper_graph(&abc_corpus())
            .edge_between(&NodeId::paper("B"), &NodeId::paper("C"))
            .is_none());
    }

    #[test]
    fn test_paper_graph_empty_publisher_never_matches() {
        // Neither paper has a publisher; absence must not read as equality.
        let graph = build_paper_graph(&[paper("A", &["X"], &[]), paper("B", &["Y"], &[])]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_build_is_order_independent() {
        let corpus = abc_corpus();
        let mut reversed = corpus.clone();
        reversed.reverse();

        assert_eq!(build_paper_graph(&corpus), build_paper_graph(&reversed));
        assert_eq!(
            build_scholar_graph(&corpus),
            build_scholar_graph(&reversed)
        );
    }

    #[test]
    fn test_duplicate_titles_last_row_wins() {
        let first = paper("A", &["X"], &[]);
        let second = paper("A", &["Q"], &[]);
        let other = paper("B", &["Q"], &[]);

        let graph = build_paper_graph(&[first, second, other]);

        assert_eq!(graph.node_count(), 2);
        // The surviving A row is the later one, so it relates to B via Q.
        let edge = graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("B"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Authors].into());
    }

    #[test]
    fn test_scholar_graph_authorship_and_coauthor() {
        let graph = build_scholar_graph(&abc_corpus());

        // One author node per distinct trimmed author string
        for name in ["X", "Y", "Z", "W"] {
            assert!(graph.contains(&NodeId::author(name)));
        }

        // Directed authorship edges author -> paper
        let edge = graph
            .edge_between(&NodeId::author("Y"), &NodeId::paper("A"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Authorship].into());
        assert!(graph
            .edge_between(&NodeId::paper("A"), &NodeId::author("Y"))
            .is_none());

        // Coauthor edges in both directions
        assert!(graph
            .edge_between(&NodeId::author("X"), &NodeId::author("Y"))
            .is_some());
        assert!(graph
            .edge_between(&NodeId::author("Y"), &NodeId::author("X"))
            .is_some());
        // X and Z never share a paper
        assert!(graph
            .edge_between(&NodeId::author("X"), &NodeId::author("Z"))
            .is_none());
    }

    #[test]
    fn test_scholar_graph_author_on_two_papers() {
        let corpus = vec![paper("P1", &["X"], &[]), paper("P2", &["X"], &[])];
        let graph = build_scholar_graph(&corpus);

        // Exactly one author node X, two authorship edges, no coauthor edges
        let author_nodes = graph
            .nodes()
            .filter(|n| n.kind == crate::relation::NodeKind::Author)
            .count();
        assert_eq!(author_nodes, 1);
        assert!(graph
            .edge_between(&NodeId::author("X"), &NodeId::paper("P1"))
            .is_some());
        assert!(graph
            .edge_between(&NodeId::author("X"), &NodeId::paper("P2"))
            .is_some());
        assert!(!graph
            .edges()
            .any(|e| e.relations.contains(&RelationKind::Coauthor)));
    }

    #[test]
    fn test_scholar_graph_keyword_edges_both_directions() {
        let graph = build_scholar_graph(&abc_corpus());

        // B and C share "vision"
        for (s, t) in [("B", "C"), ("C", "B")] {
            let edge = graph
                .edge_between(&NodeId::paper(s), &NodeId::paper(t))
                .unwrap();
            assert!(edge.relations.contains(&RelationKind::Keyword));
        }
        // A and C share nothing
        assert!(graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("C"))
            .is_none());
    }

    #[test]
    fn test_citation_to_unknown_title_creates_one_placeholder() {
        let mut citing = paper("A", &["X"], &[]);
        citing.cited_papers = vec!["Ghost".into(), "Ghost".into()];

        let graph = build_scholar_graph(&[citing]);

        let ghost = graph.get_node(&NodeId::paper("Ghost")).unwrap();
        assert!(ghost.placeholder);
        assert!(ghost.authors.is_empty() && ghost.keywords.is_empty());

        // Exactly one citation edge to the placeholder
        let citation_edges = graph
            .edges()
            .filter(|e| e.relations.contains(&RelationKind::Citation))
            .count();
        assert_eq!(citation_edges, 1);
        let edge = graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("Ghost"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Citation].into());
    }

    #[test]
    fn test_citation_to_loaded_title_links_real_node() {
        let mut citing = paper("A", &["X"], &[]);
        citing.cited_papers = vec!["B".into()];
        let cited = paper("B", &["Y"], &[]);

        let graph = build_scholar_graph(&[citing, cited]);

        let node = graph.get_node(&NodeId::paper("B")).unwrap();
        assert!(!node.placeholder);
        assert!(graph
            .edge_between(&NodeId::paper("A"), &NodeId::paper("B"))
            .unwrap()
            .relations
            .contains(&RelationKind::Citation));
    }

    #[test]
    fn test_citation_graph_drops_unknown_endpoints() {
        let papers = vec![
            CitationPaper {
                paper_id: "P1".into(),
                title: "Paper A".into(),
                authors: vec!["X".into()],
                keywords: Default::default(),
            },
            CitationPaper {
                paper_id: "P2".into(),
                title: "Paper B".into(),
                authors: vec!["Y".into()],
                keywords: Default::default(),
            },
        ];
        let links = vec![
            CitationLink {
                source_id: "P1".into(),
                target_id: "P2".into(),
            },
            CitationLink {
                source_id: "P1".into(),
                target_id: "P9".into(),
            },
        ];

        let graph = build_citation_graph(&papers, &links);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph
            .edge_between(&NodeId::paper("P1"), &NodeId::paper("P2"))
            .unwrap();
        assert_eq!(edge.relations, [RelationKind::Citation].into());
        // Node labels come from titles, not ids
        assert_eq!(graph.get_node(&NodeId::paper("P1")).unwrap().label, "Paper A");
    }
}
