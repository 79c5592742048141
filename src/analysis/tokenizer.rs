//! Word tokenizer with cleaning, stop-word filtering, stemming, and n-gram
//! expansion.
//!
//! This is the tokenization pipeline shared by training and prediction.
//! Cleaning strips markup tags, decodes HTML entities, replaces every
//! non-letter character with a space, and lower-cases the result. The
//! surviving words are filtered (empty, shorter than 3 characters, or in
//! the stop-word set), optionally stemmed, and finally expanded into
//! n-gram phrases up to the configured order.
//!
//! # Examples
//!
//! ```
//! use taxon::analysis::tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::new();
//! let tokens = tokenizer.tokenize("Buy <b>cheap</b> watches &amp; more!");
//! assert_eq!(tokens, vec!["buy", "cheap", "watches", "more"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::analysis::stemmer::Stemmer;
use crate::error::{Result, TaxonError};

/// Matches markup tags, which are removed before any other cleaning step.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Minimum token length in Unicode scalar values.
const MIN_TOKEN_LEN: usize = 3;

/// A word tokenizer with configurable n-gram order, stop words, and an
/// optional stemming capability.
///
/// Tokenization is deterministic and stateless: repeated calls with the
/// same configuration and input produce the identical sequence.
///
/// # Examples
///
/// Bigram expansion:
///
/// ```
/// use taxon::analysis::tokenizer::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.set_n_grams(2).unwrap();
///
/// let tokens = tokenizer.tokenize("one two three");
/// assert_eq!(tokens, vec!["one", "two", "three", "one two", "two three"]);
/// ```
///
/// Stop words are matched before stemming:
///
/// ```
/// use taxon::analysis::tokenizer::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.set_stop_words(vec!["watches"]);
///
/// let tokens = tokenizer.tokenize("cheap watches");
/// assert_eq!(tokens, vec!["cheap"]);
/// ```
#[derive(Clone)]
pub struct Tokenizer {
    /// Maximum n-gram order; 1 means unigrams only.
    n_grams: usize,
    /// Trimmed stop words, tested against pre-stemming tokens.
    stop_words: Arc<HashSet<String>>,
    /// Optional stemming capability applied to surviving unigrams.
    stemmer: Option<Arc<dyn Stemmer>>,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("n_grams", &self.n_grams)
            .field("stop_words", &self.stop_words.len())
            .field("stemmer", &self.stemmer.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl Tokenizer {
    /// Create a new tokenizer producing unigrams, with no stop words and no
    /// stemmer.
    pub fn new() -> Self {
        Tokenizer {
            n_grams: 1,
            stop_words: Arc::new(HashSet::new()),
            stemmer: None,
        }
    }

    /// Set the maximum n-gram order.
    ///
    /// Orders 2 and above emit multi-word phrases in addition to unigrams.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::Configuration`] if `n_grams` is below 1.
    pub fn set_n_grams(&mut self, n_grams: usize) -> Result<()> {
        if n_grams < 1 {
            return Err(TaxonError::configuration(
                "n-gram order must be at least 1",
            ));
        }
        self.n_grams = n_grams;
        Ok(())
    }

    /// Get the configured n-gram order.
    pub fn n_grams(&self) -> usize {
        self.n_grams
    }

    /// Replace the stop-word set.
    ///
    /// Each word is trimmed before insertion. Matching is exact, so the
    /// words should be lower-case to line up with the cleaned tokens.
    pub fn set_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = Arc::new(
            words
                .into_iter()
                .map(|word| word.as_ref().trim().to_string())
                .collect(),
        );
    }

    /// Get the current stop-word set.
    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Set the stemming capability applied to unigrams.
    pub fn set_stemmer(&mut self, stemmer: Arc<dyn Stemmer>) {
        self.stemmer = Some(stemmer);
    }

    /// Check whether a stemmer is configured.
    pub fn has_stemmer(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Tokenize a document into unigrams followed by n-gram phrases.
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let cleaned = self.clean(document);

        let mut tokens = Vec::new();
        for piece in cleaned.split(' ') {
            let piece = piece.trim();
            if self.is_filtered(piece) {
                continue;
            }
            let token = match &self.stemmer {
                Some(stemmer) => stemmer.stem(piece),
                None => piece.to_string(),
            };
            tokens.push(token);
        }

        // Phrases are built over the unigram sequence and appended after it.
        // The window collected at each start index has the configured
        // maximum length (not the current order); a phrase is emitted only
        // when the collected window length equals the order being generated.
        let unigrams_len = tokens.len();
        for order in 2..=self.n_grams {
            for start in 0..unigrams_len {
                let end = unigrams_len.min(start + self.n_grams);
                let window = &tokens[start..end];
                if window.len() == order {
                    tokens.push(window.join(" "));
                }
            }
        }

        tokens
    }

    /// Tokenize a document into cleaned, stop-filtered words only.
    ///
    /// Unlike [`Tokenizer::tokenize`], no stemming is applied and no n-gram
    /// phrases are generated. Used for raw frequency diagnostics.
    pub fn content_words(&self, document: &str) -> Vec<String> {
        let cleaned = self.clean(document);
        cleaned
            .split(' ')
            .map(str::trim)
            .filter(|piece| !self.is_filtered(piece))
            .map(str::to_string)
            .collect()
    }

    /// Clean a raw document: strip tags, decode entities, reduce every
    /// non-letter to a space, lower-case.
    fn clean(&self, document: &str) -> String {
        let stripped = TAG_PATTERN.replace_all(document, "");
        let decoded = decode_entities(&stripped);
        decoded
            .chars()
            .map(|c| if c.is_alphabetic() { c } else { ' ' })
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Check whether a cleaned piece is excluded from the token stream.
    fn is_filtered(&self, token: &str) -> bool {
        token.is_empty()
            || self.stop_words.contains(token)
            || token.chars().count() < MIN_TOKEN_LEN
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode HTML entities in `text`.
///
/// Handles the common named entities plus decimal and hexadecimal numeric
/// character references. Unrecognized sequences are left untouched.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // An entity name is short ASCII; anything else is literal text.
        let decoded = tail.find(';').and_then(|end| {
            let name = &tail[1..end];
            if end <= 32
                && !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
            {
                decode_entity(name).map(|c| (c, end))
            } else {
                None
            }
        });

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode a single entity name (without the surrounding `&` and `;`).
fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = if let Some(hex) = number.strip_prefix('x').or_else(|| number.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            number.parse::<u32>().ok()?
        };
        return char::from_u32(code);
    }

    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_pipeline() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("<p>Hello, World! Visit https://example.com &amp; say hi2u</p>");
        // Punctuation and digits become separators; short remnants are dropped.
        assert_eq!(
            tokens,
            vec!["hello", "world", "visit", "https", "example", "com", "say"]
        );
    }

    #[test]
    fn test_entity_decoding() {
        assert_eq!(decode_entities("fish &amp; chips"), "fish & chips");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
    }

    #[test]
    fn test_unicode_cleaning() {
        let tokenizer = Tokenizer::new();
        // Letters outside ASCII survive cleaning and Unicode lowercasing.
        let tokens = tokenizer.tokenize("Überraschung çay ÇAY");
        assert_eq!(tokens, vec!["überraschung", "çay", "çay"]);
    }

    #[test]
    fn test_length_filter_counts_codepoints() {
        let tokenizer = Tokenizer::new();
        // "ça" is two codepoints and is dropped; "çay" is three and kept.
        let tokens = tokenizer.tokenize("ça çay");
        assert_eq!(tokens, vec!["çay"]);
    }

    #[test]
    fn test_stop_words_checked_before_stemming() {
        struct TruncatingStemmer;

        impl Stemmer for TruncatingStemmer {
            fn stem(&self, word: &str) -> String {
                word.chars().take(4).collect()
            }

            fn name(&self) -> &'static str {
                "truncating"
            }
        }

        let mut tokenizer = Tokenizer::new();
        tokenizer.set_stemmer(Arc::new(TruncatingStemmer));
        // The stop list holds the full word, not the stem.
        tokenizer.set_stop_words(vec!["scheduled"]);

        let tokens = tokenizer.tokenize("meeting scheduled tomorrow");
        assert_eq!(tokens, vec!["meet", "tomo"]);
    }

    #[test]
    fn test_stop_words_are_trimmed() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_stop_words(vec!["  cheap  "]);
        assert!(tokenizer.stop_words().contains("cheap"));
        assert_eq!(tokenizer.tokenize("cheap watches"), vec!["watches"]);
    }

    #[test]
    fn test_n_gram_order_validation() {
        let mut tokenizer = Tokenizer::new();
        assert!(matches!(
            tokenizer.set_n_grams(0),
            Err(TaxonError::Configuration(_))
        ));
        assert!(tokenizer.set_n_grams(1).is_ok());
        assert_eq!(tokenizer.n_grams(), 1);
    }

    #[test]
    fn test_bigram_expansion() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(2).unwrap();

        let tokens = tokenizer.tokenize("one two three four");
        assert_eq!(
            tokens,
            vec![
                "one",
                "two",
                "three",
                "four",
                "one two",
                "two three",
                "three four",
            ]
        );
    }

    #[test]
    fn test_trigram_windowing() {
        // The window collected at each position has the configured maximum
        // length, so intermediate orders only produce phrases near the end
        // of the sequence, where the window is naturally shorter.
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(3).unwrap();

        let tokens = tokenizer.tokenize("one two three four");
        assert_eq!(
            tokens,
            vec![
                "one",
                "two",
                "three",
                "four",
                "three four",
                "one two three",
                "two three four",
            ]
        );
    }

    #[test]
    fn test_n_grams_built_from_stemmed_unigrams() {
        struct PluralStemmer;

        impl Stemmer for PluralStemmer {
            fn stem(&self, word: &str) -> String {
                word.strip_suffix('s').unwrap_or(word).to_string()
            }

            fn name(&self) -> &'static str {
                "plural"
            }
        }

        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(2).unwrap();
        tokenizer.set_stemmer(Arc::new(PluralStemmer));

        let tokens = tokenizer.tokenize("cheap watches");
        assert_eq!(tokens, vec!["cheap", "watche", "cheap watche"]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(3).unwrap();
        tokenizer.set_stop_words(vec!["and"]);

        let document = "The quick brown fox jumps over the lazy dog and runs away";
        assert_eq!(tokenizer.tokenize(document), tokenizer.tokenize(document));
    }

    #[test]
    fn test_content_words_skip_stemming_and_n_grams() {
        struct PluralStemmer;

        impl Stemmer for PluralStemmer {
            fn stem(&self, word: &str) -> String {
                word.strip_suffix('s').unwrap_or(word).to_string()
            }

            fn name(&self) -> &'static str {
                "plural"
            }
        }

        let mut tokenizer = Tokenizer::new();
        tokenizer.set_n_grams(2).unwrap();
        tokenizer.set_stemmer(Arc::new(PluralStemmer));
        tokenizer.set_stop_words(vec!["the"]);

        let words = tokenizer.content_words("the cheap watches");
        assert_eq!(words, vec!["cheap", "watches"]);
    }

    #[test]
    fn test_empty_document() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \t 42 !? ").is_empty());
    }
}
