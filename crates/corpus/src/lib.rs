//! PaperScope Corpus Library
//!
//! Loading and narrowing of the paper corpus:
//! - CSV loader with per-row warnings (malformed rows never abort a load)
//! - Modification-time keyed loader cache
//! - Case-insensitive keyword filter over title and keywords
//! - Exact-match facet filter (year, publisher, ranking)
//! - Random paper suggestions for an idle landing surface

pub mod cache;
pub mod filter;
pub mod loader;
pub mod suggest;

pub use cache::CachedLoader;
pub use filter::{
    facet_candidates, facet_filter, keyword_filter, Facet, FacetCandidates, FacetSelection,
    KeywordQuery,
};
pub use loader::{CitationCorpus, Corpus, CorpusLoader};
pub use suggest::suggest;
