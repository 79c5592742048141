//! Prediction results produced by the classifier.

/// The outcome of a single classification call.
///
/// Holds one log-probability score per class, sorted ascending by score
/// (stable, so classes with equal scores keep their original order). The
/// raw scores are log-probabilities and are typically negative; they are
/// not confined to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use taxon::classifier::Prediction;
///
/// let prediction = Prediction::new(vec![
///     ("ham".to_string(), -42.0),
///     ("spam".to_string(), -17.5),
/// ]);
///
/// assert_eq!(prediction.best_match(), Some("spam"));
/// assert_eq!(prediction.probabilities()[0].0, "ham");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class scores sorted ascending by value.
    results: Vec<(String, f64)>,
}

impl Prediction {
    /// Create a prediction from raw class scores.
    ///
    /// The scores are sorted ascending on construction. Non-finite scores
    /// are allowed and ordered by `f64::total_cmp`.
    pub fn new(mut scores: Vec<(String, f64)>) -> Self {
        scores.sort_by(|a, b| a.1.total_cmp(&b.1));
        Prediction { results: scores }
    }

    /// Get the class scores, sorted ascending.
    pub fn probabilities(&self) -> &[(String, f64)] {
        &self.results
    }

    /// Get the number of scored classes.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether the prediction holds no classes.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Get the class label with the highest score.
    ///
    /// When several classes share the maximum, the first one in the stored
    /// (ascending) order wins. Returns `None` only for an empty prediction.
    pub fn best_match(&self) -> Option<&str> {
        let max = self
            .results
            .iter()
            .map(|(_, score)| *score)
            .max_by(f64::total_cmp)?;

        self.results
            .iter()
            .find(|(_, score)| score.total_cmp(&max).is_eq())
            .map(|(class, _)| class.as_str())
    }

    /// Get the scores min-max normalized into `[1, 100]`, sorted descending.
    ///
    /// Each score is mapped through `1 + 99 * (score - min) / (max - min)`.
    /// When every class scored identically (`min == max`, including the
    /// single-class case) there is no spread to scale, and the result is
    /// empty. That is the defined degenerate outcome, not an error.
    pub fn normalized_probabilities(&self) -> Vec<(String, f64)> {
        let (min, max) = match (self.results.first(), self.results.last()) {
            (Some((_, min)), Some((_, max))) => (*min, *max),
            _ => return Vec::new(),
        };

        if min == max {
            return Vec::new();
        }

        let mut normalized: Vec<(String, f64)> = self
            .results
            .iter()
            .map(|(class, score)| {
                (class.clone(), 1.0 + 99.0 * (score - min) / (max - min))
            })
            .collect();
        normalized.sort_by(|a, b| b.1.total_cmp(&a.1));
        normalized
    }
}
