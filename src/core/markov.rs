/// Character k-mer Markov chain: transition table and training.

use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::kmer::{clean_word, kmers};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkovError {
    #[error("k-mer size must be a positive integer")]
    InvalidKmerSize,
    #[error("max word length {max_word_length} must exceed k-mer size {k} by at least 2")]
    InvalidMaxWordLength { k: usize, max_word_length: usize },
    #[error("no data for generation (transition table is empty)")]
    NoData,
    #[error("k-mer size mismatch: table uses {0}, got {1}")]
    KmerSizeMismatch(usize, usize),
}

/// Maps each k-character context to the characters seen right after it.
///
/// Successors keep duplicates: a character seen three times after a
/// context appears three times in its list, so a uniform draw from the
/// list follows the observed frequencies.
///
/// ## Invariants
/// - `0 < k < usize::MAX`
/// - Every context is exactly `k` characters long
/// - Every context has at least one successor
/// - `contexts` lists each key of `successors` once, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    k: usize,
    successors: FxHashMap<String, Vec<char>>,
    contexts: Vec<String>,
}

impl TransitionTable {
    /// Create an empty table for contexts of length `k`.
    ///
    /// `k` must be positive and leave room for the successor character.
    pub fn new(k: usize) -> Result<Self, MarkovError> {
        if k == 0 || k.checked_add(1).is_none() {
            return Err(MarkovError::InvalidKmerSize);
        }
        Ok(Self {
            k,
            successors: FxHashMap::default(),
            contexts: Vec::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Total number of (context, successor) pairs recorded.
    pub fn pair_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    /// Contexts in the order they were first observed.
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Successors recorded for `context`, if any.
    pub fn successors(&self, context: &str) -> Option<&[char]> {
        self.successors.get(context).map(Vec::as_slice)
    }

    /// Record one observation of `next` following `context`.
    fn add_transition(&mut self, context: &str, next: char) {
        match self.successors.get_mut(context) {
            Some(entries) => entries.push(next),
            None => {
                self.contexts.push(context.to_string());
                self.successors.insert(context.to_string(), vec![next]);
            }
        }
    }

    /// Split raw text on whitespace and record every k+1-gram of each
    /// cleaned token. K-mers never span two tokens.
    pub fn ingest(&mut self, text: &str) {
        let Some(gram_len) = self.k.checked_add(1) else {
            return;
        };
        for token in text.split_whitespace() {
            let word = clean_word(token);
            for gram in kmers(&word, gram_len) {
                // Cleaned words are ASCII, so the last byte is the successor
                let (context, next) = gram.split_at(self.k);
                if let Some(c) = next.chars().next() {
                    self.add_transition(context, c);
                }
            }
        }
    }

    /// Fold another table built with the same `k` into this one.
    ///
    /// Produces the same contexts and successor multisets as training on
    /// both inputs together.
    pub fn merge(&mut self, other: &Self) -> Result<(), MarkovError> {
        if self.k != other.k {
            return Err(MarkovError::KmerSizeMismatch(self.k, other.k));
        }

        for context in &other.contexts {
            if let Some(next) = other.successors.get(context) {
                for &c in next {
                    self.add_transition(context, c);
                }
            }
        }

        Ok(())
    }
}

/// Builds transition tables from raw text.
pub struct MarkovTrainer;

impl MarkovTrainer {
    /// Train a table over all `texts`, treated as one stream of tokens.
    ///
    /// Tokens shorter than `k + 1` after cleaning contribute nothing; an
    /// input with no usable tokens yields an empty table.
    pub fn train<I, S>(texts: I, k: usize) -> Result<TransitionTable, MarkovError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = TransitionTable::new(k)?;
        for text in texts {
            table.ingest(text.as_ref());
        }

        info!(
            "Trained {}-mer table: {} contexts, {} transitions",
            k,
            table.len(),
            table.pair_count()
        );
        debug!("{:?}", table.successors);

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog.";

    fn sorted(table: &TransitionTable) -> Vec<(String, Vec<char>)> {
        let mut pairs: Vec<(String, Vec<char>)> = table
            .contexts()
            .iter()
            .map(|ctx| {
                let mut next = table.successors(ctx).unwrap().to_vec();
                next.sort_unstable();
                (ctx.clone(), next)
            })
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn train_fox_k3() {
        let table = MarkovTrainer::train([FOX], 3).unwrap();
        let expected = [
            ("bro", 'w'),
            ("jum", 'p'),
            ("laz", 'y'),
            ("ove", 'r'),
            ("qui", 'c'),
            ("row", 'n'),
            ("uic", 'k'),
            ("ump", 's'),
        ];
        let expected: Vec<(String, Vec<char>)> = expected
            .iter()
            .map(|(ctx, c)| (ctx.to_string(), vec![*c]))
            .collect();
        assert_eq!(sorted(&table), expected);
    }

    #[test]
    fn train_fox_k4() {
        let table = MarkovTrainer::train([FOX], 4).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.successors("quic"), Some(&['k'][..]));
        assert_eq!(table.successors("brow"), Some(&['n'][..]));
        assert_eq!(table.successors("jump"), Some(&['s'][..]));
    }

    #[test]
    fn train_keeps_first_seen_order() {
        let table = MarkovTrainer::train([FOX], 3).unwrap();
        let order: Vec<&str> = table.contexts().iter().map(String::as_str).collect();
        assert_eq!(order, ["qui", "uic", "bro", "row", "jum", "ump", "ove", "laz"]);
    }

    #[test]
    fn train_retains_duplicate_successors() {
        let table = MarkovTrainer::train(["aab aab aac"], 2).unwrap();
        assert_eq!(table.successors("aa"), Some(&['b', 'b', 'c'][..]));
        assert_eq!(table.pair_count(), 3);
    }

    #[test]
    fn pairs_per_word_is_len_minus_k() {
        for k in 1..=6 {
            let table = MarkovTrainer::train(["abcdefg"], k).unwrap();
            assert_eq!(table.pair_count(), 7usize.saturating_sub(k), "k = {}", k);
        }
    }

    #[test]
    fn tokens_are_not_bridged() {
        let table = MarkovTrainer::train(["ab cd"], 1).unwrap();
        assert!(table.successors("b").is_none());
        assert_eq!(table.pair_count(), 2);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = MarkovTrainer::train(Vec::<String>::new(), 2).unwrap();
        assert!(table.is_empty());

        let table = MarkovTrainer::train(["... !! a by"], 2).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.pair_count(), 0);
    }

    #[test]
    fn zero_k_is_rejected() {
        assert_eq!(
            MarkovTrainer::train([FOX], 0).unwrap_err(),
            MarkovError::InvalidKmerSize
        );
    }

    #[test]
    fn huge_k_is_rejected() {
        assert_eq!(
            MarkovTrainer::train(["hello"], usize::MAX).unwrap_err(),
            MarkovError::InvalidKmerSize
        );
        assert!(TransitionTable::new(usize::MAX - 1).is_ok());
    }

    #[test]
    fn mismatch_message_names_both_sizes() {
        assert_eq!(
            MarkovError::KmerSizeMismatch(2, 3).to_string(),
            "k-mer size mismatch: table uses 2, got 3"
        );
    }

    #[test]
    fn merge_matches_joint_training() {
        let a = "the quick brown fox";
        let b = "jumps over the lazy dog";

        let mut merged = MarkovTrainer::train([a], 2).unwrap();
        merged.merge(&MarkovTrainer::train([b], 2).unwrap()).unwrap();
        let joint = MarkovTrainer::train([a, b], 2).unwrap();

        assert_eq!(merged, joint);
    }

    #[test]
    fn merge_rejects_mismatched_k() {
        let mut two = TransitionTable::new(2).unwrap();
        let three = TransitionTable::new(3).unwrap();
        assert_eq!(
            two.merge(&three).unwrap_err(),
            MarkovError::KmerSizeMismatch(2, 3)
        );
    }
}
