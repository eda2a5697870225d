//! Citation table entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the secondary paper table (`paper_id, title, authors, keywords`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPaper {
    /// Join key for the citation edge table
    pub paper_id: String,

    pub title: String,

    pub authors: Vec<String>,

    pub keywords: BTreeSet<String>,
}

/// One row of the citation edge table (`source_id, target_id`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationLink {
    /// Citing paper id
    pub source_id: String,

    /// Cited paper id
    pub target_id: String,
}
