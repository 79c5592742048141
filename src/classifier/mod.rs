//! Naive Bayes classification for Taxon.
//!
//! This module provides the [`BagOfWords`] model — corpus accumulation,
//! training, log-space scoring, and the repetitive-word diagnostic — plus
//! the [`Prediction`] result type and model persistence.

pub mod bag_of_words;
pub mod prediction;
pub mod state;

// Re-export commonly used types
pub use bag_of_words::*;
pub use prediction::*;
