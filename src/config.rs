/// Generation settings: defaults, RON loading, and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::generator::target_length_range;
use crate::core::markov::MarkovError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] MarkovError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Parameters for one training-and-generation run.
///
/// Any field missing from a RON file takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Context length k.
    pub kmer_size: usize,
    /// Number of words to generate.
    pub num_words: usize,
    /// Generated words are strictly shorter than this.
    pub max_word: usize,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            kmer_size: 2,
            num_words: 10,
            max_word: 12,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Load settings from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    /// Check that the k-mer size and max word length allow generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        target_length_range(self.kmer_size, self.max_word)?;
        Ok(())
    }
}
