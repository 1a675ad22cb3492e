/// Word generation: walking a trained transition table.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::core::markov::{MarkovError, TransitionTable};

/// Inclusive range target word lengths are drawn from.
///
/// Normally `[k + 2, max_word_length - 1]`. When `max_word_length` is
/// exactly `k + 2` the range narrows to the single length `k + 1`.
pub fn target_length_range(
    k: usize,
    max_word_length: usize,
) -> Result<RangeInclusive<usize>, MarkovError> {
    if k == 0 {
        return Err(MarkovError::InvalidKmerSize);
    }
    let lo = k.checked_add(2).ok_or(MarkovError::InvalidKmerSize)?;
    if max_word_length < lo {
        return Err(MarkovError::InvalidMaxWordLength { k, max_word_length });
    }
    let hi = max_word_length - 1;
    Ok(lo.min(hi)..=hi)
}

/// Generates words from a table with validated length parameters.
///
/// All configuration is checked in [`WordGenerator::new`], so a built
/// generator can only fail when the table has nothing to start from.
#[derive(Debug, Clone)]
pub struct WordGenerator<'a> {
    table: &'a TransitionTable,
    lengths: RangeInclusive<usize>,
}

impl<'a> WordGenerator<'a> {
    pub fn new(table: &'a TransitionTable, max_word_length: usize) -> Result<Self, MarkovError> {
        let lengths = target_length_range(table.k(), max_word_length)?;
        Ok(Self { table, lengths })
    }

    /// Generate a single word.
    ///
    /// Picks a starting context and a target length, then appends sampled
    /// successors until the target is reached or the current context has
    /// no recorded successors. Stopping early still yields a valid word.
    pub fn generate_word(&self, rng: &mut StdRng) -> Result<String, MarkovError> {
        let k = self.table.k();
        let start = self.table.contexts().choose(rng).ok_or(MarkovError::NoData)?;
        let length = rng.gen_range(self.lengths.clone());
        debug!("Length \"{}\" starting with \"{}\"", length, start);

        let mut word = start.clone();
        while word.len() < length {
            let context = &word[word.len() - k..];
            let next = match self.table.successors(context).and_then(|s| s.choose(rng)) {
                Some(&c) => c,
                None => {
                    debug!("No successors for \"{}\", stopping at {}", context, word.len());
                    break;
                }
            };
            debug!("char = \"{}\"", next);
            word.push(next);
        }

        debug!("word = \"{}\"", word);
        Ok(word)
    }

    /// Generate `count` independent words from the same random stream.
    pub fn generate(&self, count: usize, rng: &mut StdRng) -> Result<Vec<String>, MarkovError> {
        (0..count).map(|_| self.generate_word(rng)).collect()
    }
}

/// Generate `count` words in one call.
///
/// Validates `k` and `max_word_length` before touching the table. With
/// `rng_seed` set the output is reproducible; otherwise the generator is
/// seeded from OS entropy.
pub fn generate(
    table: &TransitionTable,
    count: usize,
    k: usize,
    max_word_length: usize,
    rng_seed: Option<u64>,
) -> Result<Vec<String>, MarkovError> {
    target_length_range(k, max_word_length)?;
    if k != table.k() {
        return Err(MarkovError::KmerSizeMismatch(table.k(), k));
    }

    let generator = WordGenerator::new(table, max_word_length)?;
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generator.generate(count, &mut rng)
}
