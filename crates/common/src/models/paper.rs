//! Paper record entity

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the paper corpus
///
/// `title` is the stable identifier within a loaded snapshot; every other
/// field is optional and defaults to its empty value when the source cell is
/// missing or blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title, trimmed, non-empty
    pub title: String,

    /// Credited authors in source order; empty entries dropped
    pub authors: Vec<String>,

    /// Keywords as a set; used for overlap tests, not order
    pub keywords: BTreeSet<String>,

    /// Publishing venue, if present
    pub publisher: Option<String>,

    /// Venue ranking (e.g. CORE rank), if present
    pub ranking: Option<String>,

    /// Publication year; absent or unparseable values stay `None` so they
    /// can never collide with a real year during faceting
    pub year: Option<i32>,

    /// Titles of papers this paper cites; may name titles absent from the
    /// corpus (those become placeholder nodes downstream)
    pub cited_papers: Vec<String>,

    /// Optional URI to the paper
    pub link: Option<String>,
}

impl PaperRecord {
    /// Create a record with just a title; remaining fields stay empty
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Authors shared with another paper, preserving this paper's order
    pub fn shared_authors(&self, other: &PaperRecord) -> Vec<&str> {
        self.authors
            .iter()
            .filter(|a| other.authors.iter().any(|b| b == *a))
            .map(String::as_str)
            .collect()
    }

    /// Whether this paper's keyword set intersects another's
    pub fn shares_keyword(&self, other: &PaperRecord) -> bool {
        self.keywords.iter().any(|k| other.keywords.contains(k))
    }
}
