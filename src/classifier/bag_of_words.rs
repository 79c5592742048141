//! Bag-of-words Naive Bayes classifier.
//!
//! [`BagOfWords`] accumulates labeled training documents, builds per-class
//! token statistics on [`BagOfWords::train`], and scores unseen text with a
//! multinomial Naive Bayes model in log-space. Classes are kept in a
//! `BTreeMap`, so every per-class iteration (scoring order, tie-breaks,
//! "first class" in diagnostics) is deterministic.

use std::collections::BTreeMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::stemmer::Stemmer;
use crate::analysis::tokenizer::Tokenizer;
use crate::classifier::prediction::Prediction;
use crate::error::{Result, TaxonError};

/// Additive floor keeping the likelihood numerator non-zero for tokens the
/// class never saw. This is a fixed compatibility constant, not Laplace
/// smoothing; the denominator is left untouched.
const FREQUENCY_FLOOR: f64 = 1e-13;

/// Token statistics for a single class, rebuilt wholesale by every call to
/// [`BagOfWords::train`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Total number of tokens produced by the class's documents.
    pub total: u64,
    /// Number of documents the class contributed.
    pub documents: u64,
    /// Per-token occurrence counts.
    pub frequency: BTreeMap<String, u64>,
}

/// A supervised bag-of-words text classifier.
///
/// Documents are added per class with [`BagOfWords::add`], turned into
/// per-class statistics with [`BagOfWords::train`], and scored with
/// [`BagOfWords::predict`]. Retraining fully recomputes the statistics from
/// the current corpus.
///
/// Mutating calls take `&mut self`; prediction is read-only and may run
/// concurrently once training has completed.
///
/// # Examples
///
/// ```
/// use taxon::classifier::BagOfWords;
///
/// let mut model = BagOfWords::new();
/// model.add("spam", "buy cheap watches now");
/// model.add("ham", "meeting scheduled for tomorrow");
/// model.train();
///
/// let prediction = model.predict("cheap watches").unwrap();
/// assert_eq!(prediction.best_match(), Some("spam"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BagOfWords {
    /// Tokenizer configuration shared by training and prediction.
    pub(crate) tokenizer: Tokenizer,
    /// Training corpus: class label to its documents. Not persisted.
    pub(crate) documents: BTreeMap<String, Vec<String>>,
    /// Per-class statistics produced by the last training run.
    pub(crate) stats: BTreeMap<String, ClassStats>,
    /// Number of distinct tokens across all classes.
    pub(crate) vocabulary_count: u64,
    /// Number of documents added across all classes.
    pub(crate) documents_total: u64,
}

impl BagOfWords {
    /// Create a new, empty model with unigram tokenization, no stop words,
    /// and no stemmer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the n-gram order used by training and prediction.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::Configuration`] if `n_grams` is below 1.
    pub fn set_n_grams(&mut self, n_grams: usize) -> Result<()> {
        self.tokenizer.set_n_grams(n_grams)
    }

    /// Replace the stop-word set. Entries are trimmed on ingest.
    pub fn set_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tokenizer.set_stop_words(words);
    }

    /// Set the stemming capability applied during tokenization.
    ///
    /// The stemmer is not part of the persisted model state; it must be
    /// re-injected after loading a model.
    pub fn set_stemmer(&mut self, stemmer: Arc<dyn Stemmer>) {
        self.tokenizer.set_stemmer(stemmer);
    }

    /// Get the tokenizer configuration.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Add a training document to a class.
    ///
    /// The class is created on first use. Labels and documents are stored
    /// verbatim; no normalization or validation is applied.
    pub fn add<C, D>(&mut self, class: C, document: D)
    where
        C: Into<String>,
        D: Into<String>,
    {
        self.documents
            .entry(class.into())
            .or_default()
            .push(document.into());
        self.documents_total += 1;
    }

    /// Train the model from the current corpus.
    ///
    /// All per-class statistics and the vocabulary count are recomputed
    /// from scratch, so retraining after further [`BagOfWords::add`] calls
    /// never merges with stale state. Classes are processed in parallel;
    /// the merge is order-independent, so the result is identical to the
    /// sequential [`BagOfWords::train_with_progress`].
    pub fn train(&mut self) {
        let built: Vec<(String, ClassStats)> = {
            let this = &*self;
            let entries: Vec<(&String, &Vec<String>)> = this.documents.iter().collect();
            entries
                .par_iter()
                .map(|(class, documents)| {
                    let mut stats = ClassStats::default();
                    for document in documents.iter() {
                        this.accumulate(&mut stats, document);
                    }
                    ((*class).clone(), stats)
                })
                .collect()
        };
        self.finish_training(built);
    }

    /// Train the model, invoking `progress` once after each processed
    /// document.
    ///
    /// The callback is for external progress reporting only and has no
    /// effect on the resulting statistics. Runs sequentially.
    pub fn train_with_progress<F>(&mut self, mut progress: F)
    where
        F: FnMut(),
    {
        let mut built = Vec::with_capacity(self.documents.len());
        for (class, documents) in &self.documents {
            let mut stats = ClassStats::default();
            for document in documents {
                self.accumulate(&mut stats, document);
                progress();
            }
            built.push((class.clone(), stats));
        }
        self.finish_training(built);
    }

    /// Tokenize one document into a class's running statistics.
    fn accumulate(&self, stats: &mut ClassStats, document: &str) {
        let tokens = self.tokenizer.tokenize(document);
        stats.total += tokens.len() as u64;
        stats.documents += 1;
        for token in tokens {
            *stats.frequency.entry(token).or_insert(0) += 1;
        }
    }

    /// Install freshly built statistics and derive the vocabulary count.
    fn finish_training(&mut self, built: Vec<(String, ClassStats)>) {
        self.vocabulary_count = {
            let mut vocabulary: AHashSet<&str> = AHashSet::new();
            for (_, stats) in &built {
                for token in stats.frequency.keys() {
                    vocabulary.insert(token.as_str());
                }
            }
            vocabulary.len() as u64
        };
        self.stats = built.into_iter().collect();
    }

    /// Check whether the model holds trained statistics.
    pub fn is_trained(&self) -> bool {
        !self.stats.is_empty() && self.documents_total > 0
    }

    /// Get the number of distinct tokens observed across all classes.
    pub fn vocabulary_count(&self) -> u64 {
        self.vocabulary_count
    }

    /// Get the number of documents added across all classes.
    pub fn document_count(&self) -> u64 {
        self.documents_total
    }

    /// Iterate over the class labels known to the trained model.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.stats.keys().map(String::as_str)
    }

    /// Get the trained statistics for a class.
    pub fn class_stats(&self, class: &str) -> Option<&ClassStats> {
        self.stats.get(class)
    }

    /// Classify a text against the trained model.
    ///
    /// The text is tokenized with the trained configuration and each class
    /// receives a log-probability score: the class prior
    /// `ln(class documents / total documents)` plus one likelihood term
    /// `ln((token frequency + 1e-13) / (class token total * vocabulary))`
    /// per token. Classes are scored in parallel with a deterministic,
    /// order-preserving merge.
    ///
    /// A class deserialized with zero documents or zero tokens yields a
    /// non-finite score; such values propagate into the [`Prediction`]
    /// rather than being reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::ModelNotTrained`] when no statistics exist or
    /// the corpus was empty, instead of dividing by zero.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        if !self.is_trained() {
            return Err(TaxonError::ModelNotTrained);
        }

        let tokens = self.tokenizer.tokenize(text);
        let entries: Vec<(&String, &ClassStats)> = self.stats.iter().collect();
        let scores: Vec<(String, f64)> = entries
            .par_iter()
            .map(|(class, stats)| {
                let mut score = self.prior_log_probability(stats);
                for token in &tokens {
                    score += self.token_log_probability(stats, token);
                }
                ((*class).clone(), score)
            })
            .collect();

        Ok(Prediction::new(scores))
    }

    /// Log prior probability of a class.
    fn prior_log_probability(&self, stats: &ClassStats) -> f64 {
        (stats.documents as f64 / self.documents_total as f64).ln()
    }

    /// Log likelihood contribution of a single token for a class.
    fn token_log_probability(&self, stats: &ClassStats, token: &str) -> f64 {
        let frequency = stats.frequency.get(token).copied().unwrap_or(0) as f64;
        ((frequency + FREQUENCY_FLOOR) / (stats.total as f64 * self.vocabulary_count as f64)).ln()
    }

    /// Extract tokens that are frequent in every class.
    ///
    /// This diagnostic is independent of the trained statistics. Every
    /// training document is re-tokenized with cleaning and stop-word
    /// filtering only (no stemming, no n-grams), the raw counts of each
    /// class are min-max normalized into `[0.1, 1]` (or exactly `1.0` when
    /// a class has a single distinct count), and a token is retained only
    /// if it occurs in every class with a normalized value of at least
    /// `minimal_frequency` everywhere. The returned entries carry the first
    /// class's normalized values, in that class's descending-frequency
    /// order.
    ///
    /// Useful for mining corpus-wide filler words to feed back into
    /// [`BagOfWords::set_stop_words`].
    pub fn repetitive_words(&self, minimal_frequency: f64) -> Vec<(String, f64)> {
        if self.documents.is_empty() {
            return Vec::new();
        }

        let mut normalized: Vec<Vec<(String, f64)>> = Vec::with_capacity(self.documents.len());
        for documents in self.documents.values() {
            // Count raw occurrences, remembering first-seen order so ties
            // rank deterministically.
            let mut order: Vec<String> = Vec::new();
            let mut counts: AHashMap<String, u64> = AHashMap::new();
            for document in documents {
                for token in self.tokenizer.content_words(document) {
                    match counts.entry(token) {
                        Entry::Occupied(mut entry) => *entry.get_mut() += 1,
                        Entry::Vacant(entry) => {
                            order.push(entry.key().clone());
                            entry.insert(1);
                        }
                    }
                }
            }

            let mut ranked: Vec<(String, u64)> = order
                .into_iter()
                .map(|token| {
                    let count = counts.get(&token).copied().unwrap_or(0);
                    (token, count)
                })
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));

            let max = ranked.first().map(|(_, count)| *count).unwrap_or(0);
            let min = ranked.last().map(|(_, count)| *count).unwrap_or(0);
            let scaled = ranked
                .into_iter()
                .map(|(token, count)| {
                    let value = if max > min {
                        0.1 + 0.9 * (count - min) as f64 / (max - min) as f64
                    } else {
                        1.0
                    };
                    (token, value)
                })
                .collect();
            normalized.push(scaled);
        }

        let mut classes = normalized.into_iter();
        let first = match classes.next() {
            Some(first) => first,
            None => return Vec::new(),
        };
        let rest: Vec<AHashMap<String, f64>> = classes
            .map(|class| class.into_iter().collect())
            .collect();

        first
            .into_iter()
            .filter(|(token, value)| {
                *value >= minimal_frequency
                    && rest
                        .iter()
                        .all(|class| class.get(token).is_some_and(|v| *v >= minimal_frequency))
            })
            .collect()
    }
}
