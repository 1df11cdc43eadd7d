//! Autocorrect - spelling correction learned from a text corpus.
//!
//! # Overview
//!
//! The library:
//! - Counts word occurrences in a training corpus
//! - Prunes rare words below a minimum-occurrence threshold
//! - Generates every string within one or two edits of a misspelled word
//! - Picks the known candidate with the highest relative frequency
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Free Text      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Tokenizer      │ ← Splits words from punctuation (tokenize.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Corrector      │ ← Cascade: exact, distance 1, distance 2 (corrector.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Edits          │ ← Delete/transpose/replace/insert candidates (edits.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FrequencyModel  │ ← Learned counts and lookup table (dictionary.rs)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use autocorrect::{Corrector, FrequencyModel};
//!
//! let model = FrequencyModel::new(0)?;
//! model.learn("the quick brown fox")?;
//!
//! let corrector = Corrector::new(Arc::new(model));
//! assert_eq!(corrector.correct_word("teh")?, "the");
//! assert_eq!(corrector.correct_text("Teh quikc fox.")?, "The quick fox.");
//! # Ok::<(), autocorrect::AutocorrectError>(())
//! ```

pub mod config;
pub mod corpus;
pub mod corrector;
pub mod dictionary;
pub mod edits;
pub mod error;
pub mod letters;
pub mod tokenize;

pub use config::Config;
pub use corpus::Corpus;
pub use corrector::{best_correction, CandidateTier, Correction, Corrector};
pub use dictionary::{FrequencyModel, Generation, Summary};
pub use error::{AutocorrectError, Result};
pub use letters::{Alphabet, LetterSet};
