//! Corpus data models
//!
//! Typed records for the two input tables:
//! - the primary paper table (`title, authors, keywords, publisher, ranking,
//!   year, cited_papers, link`)
//! - the secondary citation tables (`paper_id, title, authors, keywords` plus
//!   `source_id, target_id`)

mod citation;
mod paper;

pub use citation::{CitationLink, CitationPaper};
pub use paper::PaperRecord;
