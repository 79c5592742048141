//! # Taxon
//!
//! A multinomial Naive Bayes text classifier for Rust.
//!
//! ## Features
//!
//! - Bag-of-words representation with optional n-gram expansion
//! - Unicode-aware text cleaning and stop-word filtering
//! - Pluggable stemming through a single-method capability
//! - Log-space scoring with ranked and min-max normalized results
//! - Compact binary or JSON model persistence
//!
//! ## Example
//!
//! ```
//! use taxon::classifier::BagOfWords;
//!
//! let mut model = BagOfWords::new();
//! model.add("spam", "buy cheap watches now");
//! model.add("ham", "meeting scheduled for tomorrow");
//! model.train();
//!
//! let prediction = model.predict("cheap watches").unwrap();
//! assert_eq!(prediction.best_match(), Some("spam"));
//! ```

pub mod analysis;
pub mod classifier;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
