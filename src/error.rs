//! Error types for the Taxon library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TaxonError`] enum.
//!
//! # Examples
//!
//! ```
//! use taxon::error::{Result, TaxonError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TaxonError::configuration("n-gram order must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Taxon operations.
///
/// Configuration and precondition failures are reported through this enum.
/// Numeric degeneracies inside scoring (for example a non-finite class
/// prior) are deliberately not errors; they propagate into the returned
/// scores instead.
#[derive(Error, Debug)]
pub enum TaxonError {
    /// I/O errors (model save/load).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid classifier configuration (e.g. an n-gram order below 1).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prediction was requested before the model was trained.
    #[error("Model has not been trained")]
    ModelNotTrained,

    /// Binary model encoding/decoding errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`TaxonError`].
pub type Result<T> = std::result::Result<T, TaxonError>;

impl TaxonError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        TaxonError::Configuration(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        TaxonError::Serialization(msg.into())
    }
}
