//! Default stop-word lists.
//!
//! The classifier starts with an empty stop-word set; these lists are a
//! convenience for callers that want a sensible English default.
//!
//! # Examples
//!
//! ```
//! use taxon::analysis::stop_words::DEFAULT_ENGLISH_STOP_WORDS;
//! use taxon::classifier::BagOfWords;
//!
//! let mut model = BagOfWords::new();
//! model.set_stop_words(DEFAULT_ENGLISH_STOP_WORDS.iter().copied());
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
///
/// Common English words that typically carry no discriminative signal.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});
