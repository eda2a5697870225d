//! Random paper suggestions
//!
//! Picks a small random sample of the corpus for an idle landing surface
//! ("papers you may like"), before the user has entered any keyword.

use rand::seq::SliceRandom;
use rand::Rng;

use paperscope_common::models::PaperRecord;

/// Lower bound of the suggestion sample size
pub const MIN_SUGGESTIONS: usize = 2;

/// Upper bound of the suggestion sample size
pub const MAX_SUGGESTIONS: usize = 3;

/// Sample 2-3 distinct papers uniformly at random
///
/// Smaller corpora yield what they have; an empty corpus yields an empty
/// list. Pass a seeded RNG for reproducible suggestions.
pub fn suggest(corpus: &[PaperRecord], rng: &mut impl Rng) -> Vec<PaperRecord> {
    if corpus.is_empty() {
        return Vec::new();
    }
    let count = rng
        .gen_range(MIN_SUGGESTIONS..=MAX_SUGGESTIONS)
        .min(corpus.len());
    corpus.choose_multiple(rng, count).cloned().collect()
}
