//! Gibberish: pronounceable-looking word generation.
//!
//! Learns which characters follow each k-character context in training
//! text, then samples new words from those transitions.

pub mod config;
pub mod core;
pub mod output;

pub use crate::config::{ConfigError, GenerationConfig};
pub use crate::core::generator::{generate, WordGenerator};
pub use crate::core::markov::{MarkovError, MarkovTrainer, TransitionTable};
