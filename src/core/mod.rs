pub mod generator;
pub mod kmer;
pub mod markov;
