//! Text analysis module for Taxon.
//!
//! This module provides the tokenization pipeline the classifier is built
//! on: document cleaning, stop-word filtering, the stemming capability, and
//! n-gram expansion.

pub mod stemmer;
pub mod stop_words;
pub mod tokenizer;

// Re-export commonly used types
pub use stemmer::*;
pub use stop_words::*;
pub use tokenizer::*;
