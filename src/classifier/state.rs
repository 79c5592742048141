//! Model persistence.
//!
//! The serializable model state is exactly what prediction needs: n-gram
//! order, vocabulary count, per-class statistics, the global document
//! count, and the stop-word set. The training corpus is not persisted, and
//! neither is the stemming capability — a stemmer must be re-injected with
//! [`BagOfWords::set_stemmer`] after loading.
//!
//! A deserialized model reproduces bit-identical scores to the source
//! model: only integer counts cross the serialization boundary, so the
//! floating-point scoring arithmetic is recomputed from identical inputs.
//!
//! # Examples
//!
//! ```
//! use taxon::classifier::BagOfWords;
//!
//! let mut model = BagOfWords::new();
//! model.add("spam", "buy cheap watches now");
//! model.add("ham", "meeting scheduled for tomorrow");
//! model.train();
//!
//! let bytes = model.to_bytes().unwrap();
//! let restored = BagOfWords::from_bytes(&bytes).unwrap();
//!
//! assert_eq!(
//!     restored.predict("cheap watches").unwrap().probabilities(),
//!     model.predict("cheap watches").unwrap().probabilities(),
//! );
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::Tokenizer;
use crate::classifier::bag_of_words::{BagOfWords, ClassStats};
use crate::error::{Result, TaxonError};

/// The persisted form of a trained model.
///
/// Ordered collections keep the encoding deterministic: serializing the
/// same model twice produces the same bytes.
#[derive(Debug, Serialize, Deserialize)]
struct ModelState {
    /// Configured n-gram order.
    n_grams: usize,
    /// Number of distinct tokens across all classes.
    vocabulary_count: u64,
    /// Per-class token statistics.
    stats: BTreeMap<String, ClassStats>,
    /// Number of documents added across all classes.
    documents_total: u64,
    /// Stop-word set active when the model was trained.
    stop_words: BTreeSet<String>,
}

impl ModelState {
    /// Snapshot the persistable parts of a model.
    fn capture(model: &BagOfWords) -> Self {
        ModelState {
            n_grams: model.tokenizer.n_grams(),
            vocabulary_count: model.vocabulary_count,
            stats: model.stats.clone(),
            documents_total: model.documents_total,
            stop_words: model.tokenizer.stop_words().iter().cloned().collect(),
        }
    }

    /// Rebuild a model from a snapshot. The corpus starts empty and no
    /// stemmer is configured.
    fn restore(self) -> Result<BagOfWords> {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(self.n_grams)?;
        tokenizer.set_stop_words(self.stop_words);

        Ok(BagOfWords {
            tokenizer,
            documents: BTreeMap::new(),
            stats: self.stats,
            vocabulary_count: self.vocabulary_count,
            documents_total: self.documents_total,
        })
    }
}

impl BagOfWords {
    /// Serialize the trained model state to a compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&ModelState::capture(self))
            .map_err(|e| TaxonError::serialization(format!("failed to encode model: {e}")))
    }

    /// Deserialize a model from its binary form.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::Serialization`] for malformed input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let state: ModelState = bincode::deserialize(bytes)
            .map_err(|e| TaxonError::serialization(format!("failed to decode model: {e}")))?;
        state.restore()
    }

    /// Serialize the trained model state to a self-describing JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&ModelState::capture(self))?)
    }

    /// Deserialize a model from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: ModelState = serde_json::from_str(json)?;
        state.restore()
    }

    /// Write the binary model state to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read a model back from a file written by [`BagOfWords::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained_model() -> BagOfWords {
        let mut model = BagOfWords::new();
        model.set_n_grams(2).unwrap();
        model.set_stop_words(vec!["the"]);
        model.add("spam", "buy the cheap watches now");
        model.add("ham", "meeting scheduled for tomorrow");
        model.train();
        model
    }

    #[test]
    fn test_binary_round_trip_is_bit_identical() {
        let model = trained_model();
        let restored = BagOfWords::from_bytes(&model.to_bytes().unwrap()).unwrap();

        for text in ["cheap watches", "meeting tomorrow", "unrelated words"] {
            let original = model.predict(text).unwrap();
            let reloaded = restored.predict(text).unwrap();
            assert_eq!(original.probabilities(), reloaded.probabilities());
        }
    }

    #[test]
    fn test_round_trip_preserves_configuration() {
        let model = trained_model();
        let restored = BagOfWords::from_bytes(&model.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.tokenizer().n_grams(), 2);
        assert!(restored.tokenizer().stop_words().contains("the"));
        assert_eq!(restored.vocabulary_count(), model.vocabulary_count());
        assert_eq!(restored.document_count(), model.document_count());
        assert!(!restored.tokenizer().has_stemmer());
    }

    #[test]
    fn test_corpus_is_not_persisted() {
        let model = trained_model();
        let restored = BagOfWords::from_bytes(&model.to_bytes().unwrap()).unwrap();

        // The restored model predicts but holds no raw documents.
        assert!(restored.repetitive_words(0.0).is_empty());
        assert!(restored.predict("cheap watches").is_ok());
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let model = trained_model();
        assert_eq!(model.to_bytes().unwrap(), model.to_bytes().unwrap());
    }

    #[test]
    fn test_json_round_trip() {
        let model = trained_model();
        let restored = BagOfWords::from_json(&model.to_json().unwrap()).unwrap();

        assert_eq!(
            model.predict("cheap watches").unwrap().probabilities(),
            restored.predict("cheap watches").unwrap().probabilities(),
        );
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert!(matches!(
            BagOfWords::from_bytes(&[0x00, 0x01]),
            Err(TaxonError::Serialization(_))
        ));
        assert!(matches!(
            BagOfWords::from_json("{not json"),
            Err(TaxonError::Json(_))
        ));
    }
}
