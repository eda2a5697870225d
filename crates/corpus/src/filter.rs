//! Keyword and facet filtering
//!
//! Two narrowing stages, applied in order:
//! 1. Keyword filter: case-insensitive substring match over the title and
//!    the keywords field.
//! 2. Facet filter: exact-match membership in one chosen facet (year,
//!    publisher, ranking).
//!
//! Both stages return subsets as values; an empty result is not an error.
//! The pairwise graph builders are quadratic in subset size, so callers are
//! expected to narrow here before asking for a visualization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use paperscope_common::errors::{AppError, Result};
use paperscope_common::models::PaperRecord;

/// Validated, lowercased keyword query
///
/// Construction is the gate that rejects blank input: a caller holding a
/// `KeywordQuery` has already handled the "please enter a keyword" case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    raw: String,
    lowered: String,
}

impl KeywordQuery {
    /// Parse user input, rejecting empty or whitespace-only keywords
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(AppError::EmptyQuery);
        }
        Ok(Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        })
    }

    /// The trimmed query as entered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether a record matches: substring containment tested independently
    /// against the title and against the keywords joined as text
    pub fn matches(&self, paper: &PaperRecord) -> bool {
        if paper.title.to_lowercase().contains(&self.lowered) {
            return true;
        }
        let keywords_text = paper
            .keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
            .to_lowercase();
        keywords_text.contains(&self.lowered)
    }
}

/// Keep the records whose title or keywords contain the query
pub fn keyword_filter(corpus: &[PaperRecord], query: &KeywordQuery) -> Vec<PaperRecord> {
    corpus
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect()
}

/// Secondary narrowing facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    None,
    Year,
    Publisher,
    Ranking,
}

/// Chosen values for one facet
///
/// `None` and empty chosen sets both pass the subset through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetSelection {
    None,
    Years(BTreeSet<i32>),
    Publishers(BTreeSet<String>),
    Rankings(BTreeSet<String>),
}

impl FacetSelection {
    fn keeps(&self, paper: &PaperRecord) -> bool {
        match self {
            FacetSelection::None => true,
            FacetSelection::Years(chosen) => {
                chosen.is_empty() || paper.year.is_some_and(|y| chosen.contains(&y))
            }
            FacetSelection::Publishers(chosen) => {
                chosen.is_empty()
                    || paper
                        .publisher
                        .as_deref()
                        .is_some_and(|p| chosen.contains(p))
            }
            FacetSelection::Rankings(chosen) => {
                chosen.is_empty()
                    || paper
                        .ranking
                        .as_deref()
                        .is_some_and(|r| chosen.contains(r))
            }
        }
    }
}

/// Narrow a keyword-filtered subset by exact facet membership
pub fn facet_filter(subset: &[PaperRecord], selection: &FacetSelection) -> Vec<PaperRecord> {
    subset
        .iter()
        .filter(|p| selection.keeps(p))
        .cloned()
        .collect()
}

/// Candidate values for one facet, derived from the current subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetCandidates {
    None,
    /// Distinct years present, ascending
    Years(Vec<i32>),
    /// Distinct publisher or ranking values present, ascending
    Values(Vec<String>),
}

/// Values to offer the caller for a facet
///
/// Always derived from the *current* keyword-filtered subset, sorted
/// ascending, with missing values excluded.
pub fn facet_candidates(subset: &[PaperRecord], facet: Facet) -> FacetCandidates {
    match facet {
        Facet::None => FacetCandidates::None,
        Facet::Year => {
            let years: BTreeSet<i32> = subset.iter().filter_map(|p| p.year).collect();
            FacetCandidates::Years(years.into_iter().collect())
        }
        Facet::Publisher => {
            let values: BTreeSet<String> =
                subset.iter().filter_map(|p| p.publisher.clone()).collect();
            FacetCandidates::Values(values.into_iter().collect())
        }
        Facet::Ranking => {
            let values: BTreeSet<String> =
                subset.iter().filter_map(|p| p.ranking.clone()).collect();
            FacetCandidates::Values(values.into_iter().collect())
        }
    }
}
