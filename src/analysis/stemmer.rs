//! Stemming capability consumed by the tokenizer.
//!
//! Taxon does not ship a stemming algorithm. Stemming is consumed through
//! the single-method [`Stemmer`] trait: callers inject an implementation
//! (for example a Porter or Snowball stemmer from another crate), and when
//! none is configured tokens pass through unchanged.

/// Trait for stemming algorithms.
///
/// Implementations must be pure and deterministic: the classifier calls
/// `stem` during both training and prediction and relies on identical
/// inputs producing identical outputs.
///
/// # Examples
///
/// ```
/// use taxon::analysis::stemmer::Stemmer;
///
/// struct PluralStemmer;
///
/// impl Stemmer for PluralStemmer {
///     fn stem(&self, word: &str) -> String {
///         word.strip_suffix('s').unwrap_or(word).to_string()
///     }
///
///     fn name(&self) -> &'static str {
///         "plural"
///     }
/// }
///
/// let stemmer = PluralStemmer;
/// assert_eq!(stemmer.stem("watches"), "watche");
/// ```
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// A stemmer that returns every word unchanged.
///
/// Useful as an explicit no-op where a [`Stemmer`] is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    /// Create a new identity stemmer.
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
