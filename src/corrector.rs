//! Candidate cascade and frequency-based selection of the best correction.

use crate::config::{Config, MAX_EDIT_DISTANCE};
use crate::dictionary::{FrequencyModel, Generation};
use crate::edits::{edits1, edits2_iter};
use crate::error::{AutocorrectError, Result};
use crate::tokenize::{detokenize, is_word_token, tokenize};
use std::sync::Arc;
use tracing::debug;

/// Which step of the cascade produced the correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateTier {
    /// The word itself is in the lookup table.
    Exact,
    Distance1,
    Distance2,
    /// No known word within reach; the input is returned as is.
    Unchanged,
}

/// Outcome of correcting a single word.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
    pub tier: CandidateTier,
    /// Lookup count of `corrected`, 0 when unchanged.
    pub count: u64,
    /// `count` relative to the lookup table total.
    pub probability: f64,
}

impl Correction {
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// Highest-count known candidate. Equal counts go to the smallest word.
fn most_probable<I>(candidates: I, generation: &Generation) -> Option<(String, u64)>
where
    I: IntoIterator<Item = String>,
{
    let mut best: Option<(String, u64)> = None;
    for candidate in candidates {
        let Some(count) = generation.lookup_count(&candidate) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((word, best_count)) => {
                count > *best_count || (count == *best_count && candidate < *word)
            }
        };
        if better {
            best = Some((candidate, count));
        }
    }
    best
}

/// Run the cascade for `word` against one model generation.
///
/// Tiers are tried in order (exact, distance 1, distance 2) and the first
/// tier with a known candidate wins. `max_edit_distance` cuts the cascade
/// short. `word` must already be lowercase.
pub fn best_correction(word: &str, generation: &Generation, max_edit_distance: i32) -> Correction {
    let found = |corrected: String, count: u64, tier: CandidateTier| Correction {
        original: word.to_string(),
        probability: generation.probability(&corrected),
        corrected,
        tier,
        count,
    };

    if let Some(count) = generation.lookup_count(word) {
        return found(word.to_string(), count, CandidateTier::Exact);
    }

    if max_edit_distance >= 1 {
        let alphabet = generation.alphabet();

        if let Some((corrected, count)) = most_probable(edits1(word, &alphabet), generation) {
            return found(corrected, count, CandidateTier::Distance1);
        }

        if max_edit_distance >= 2 {
            if let Some((corrected, count)) =
                most_probable(edits2_iter(word, &alphabet), generation)
            {
                return found(corrected, count, CandidateTier::Distance2);
            }
        }
    }

    Correction {
        original: word.to_string(),
        corrected: word.to_string(),
        tier: CandidateTier::Unchanged,
        count: 0,
        probability: 0.0,
    }
}

/// Re-apply the capitalization of `template` to `word`.
fn match_case(template: &str, word: &str) -> String {
    let letters: Vec<char> = template.chars().filter(|c| c.is_alphabetic()).collect();
    let all_upper = letters.len() > 1 && letters.iter().all(|c| !c.is_lowercase());

    if all_upper {
        return word.to_uppercase();
    }

    if template.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = word.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    word.to_string()
}

fn correct_token(token: &str, generation: &Generation, max_edit_distance: i32) -> String {
    let lowered = token.to_lowercase();
    let correction = best_correction(&lowered, generation, max_edit_distance);

    if correction.corrected == lowered {
        return token.to_string();
    }

    debug!(
        original = token,
        corrected = %correction.corrected,
        tier = ?correction.tier,
        "corrected word"
    );
    match_case(token, &correction.corrected)
}

/// Corrects words against a shared [`FrequencyModel`].
pub struct Corrector {
    model: Arc<FrequencyModel>,
    max_edit_distance: i32,
}

impl Corrector {
    /// Create a corrector that searches up to two edits away.
    ///
    /// # Example
    /// ```rust
    /// use std::sync::Arc;
    /// use autocorrect::{Corrector, FrequencyModel};
    ///
    /// let model = FrequencyModel::new(0)?;
    /// model.learn("hello world")?;
    /// let corrector = Corrector::new(Arc::new(model));
    /// assert_eq!(corrector.correct_word("wrld")?, "world");
    /// # Ok::<(), autocorrect::AutocorrectError>(())
    /// ```
    pub fn new(model: Arc<FrequencyModel>) -> Self {
        Self {
            model,
            max_edit_distance: MAX_EDIT_DISTANCE,
        }
    }

    /// Create a corrector using the edit distance from `config`.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` fails [`Config::validate`].
    pub fn with_config(model: Arc<FrequencyModel>, config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_max_edit_distance(model, config.max_edit_distance)
    }

    /// Create a corrector that stops the cascade at `max_edit_distance`.
    ///
    /// # Errors
    /// `InvalidConfig` unless `max_edit_distance` is 0, 1 or 2.
    pub fn with_max_edit_distance(model: Arc<FrequencyModel>, max_edit_distance: i32) -> Result<Self> {
        if !(0..=MAX_EDIT_DISTANCE).contains(&max_edit_distance) {
            return Err(AutocorrectError::InvalidConfig(format!(
                "max_edit_distance must be between 0 and {MAX_EDIT_DISTANCE}, got {max_edit_distance}"
            )));
        }

        Ok(Self {
            model,
            max_edit_distance,
        })
    }

    /// The model corrections are drawn from.
    pub fn model(&self) -> &Arc<FrequencyModel> {
        &self.model
    }

    /// Deepest cascade tier this corrector searches.
    pub fn max_edit_distance(&self) -> i32 {
        self.max_edit_distance
    }

    /// Full cascade result for one lowercase word.
    ///
    /// # Errors
    /// `UninitializedModel` before the model learned or loaded anything.
    pub fn correction(&self, word: &str) -> Result<Correction> {
        let generation = self.model.snapshot()?;
        Ok(best_correction(word, &generation, self.max_edit_distance))
    }

    /// Most probable spelling of `word`, or `word` itself if nothing is close.
    ///
    /// # Errors
    /// `UninitializedModel` before the model learned or loaded anything.
    pub fn correct_word(&self, word: &str) -> Result<String> {
        Ok(self.correction(word)?.corrected)
    }

    /// Correct every word token; punctuation and whitespace pass through.
    ///
    /// The whole sentence is corrected against one snapshot of the model.
    ///
    /// # Errors
    /// `UninitializedModel` before the model learned or loaded anything.
    pub fn correct_sentence<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        let generation = self.model.snapshot()?;

        Ok(tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                if is_word_token(token) {
                    correct_token(token, &generation, self.max_edit_distance)
                } else {
                    token.to_string()
                }
            })
            .collect())
    }

    /// Tokenize `text`, correct it, and join it back together.
    ///
    /// # Errors
    /// `UninitializedModel` before the model learned or loaded anything.
    pub fn correct_text(&self, text: &str) -> Result<String> {
        let corrected = self.correct_sentence(&tokenize(text))?;
        Ok(detokenize(&corrected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector(threshold: i64, text: &str) -> Corrector {
        let model = FrequencyModel::new(threshold).unwrap();
        model.learn(text).unwrap();
        Corrector::new(Arc::new(model))
    }

    #[test]
    fn test_transpose_correction() {
        let corrector = corrector(0, "the quick brown fox");
        assert_eq!(corrector.correct_word("teh").unwrap(), "the");

        let correction = corrector.correction("teh").unwrap();
        assert_eq!(correction.tier, CandidateTier::Distance1);
        assert!(correction.is_changed());
        assert!((correction.probability - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_highest_count_wins() {
        let corrector = corrector(0, "cat cat cat cut dog");
        assert_eq!(corrector.correct_word("cot").unwrap(), "cat");
    }

    #[test]
    fn test_equal_counts_pick_smallest_word() {
        let corrector = corrector(0, "cat bat");
        assert_eq!(corrector.correct_word("aat").unwrap(), "bat");
    }

    #[test]
    fn test_known_word_is_kept() {
        let corrector = corrector(0, "cot cat cat cat");
        let correction = corrector.correction("cot").unwrap();
        assert_eq!(correction.corrected, "cot");
        assert_eq!(correction.tier, CandidateTier::Exact);
        assert!(!correction.is_changed());
    }

    #[test]
    fn test_pruned_word_is_not_a_target() {
        let corrector = corrector(2, "cat cat cot");
        assert_eq!(corrector.correct_word("cot").unwrap(), "cat");
    }

    #[test]
    fn test_distance_two_and_cutoff() {
        let model = FrequencyModel::new(0).unwrap();
        model.learn("hello").unwrap();
        let model = Arc::new(model);

        let deep = Corrector::new(model.clone());
        let correction = deep.correction("hlo").unwrap();
        assert_eq!(correction.corrected, "hello");
        assert_eq!(correction.tier, CandidateTier::Distance2);

        let shallow = Corrector::with_max_edit_distance(model.clone(), 1).unwrap();
        assert_eq!(shallow.correct_word("hlo").unwrap(), "hlo");

        let exact_only = Corrector::with_max_edit_distance(model, 0).unwrap();
        assert_eq!(exact_only.correct_word("helo").unwrap(), "helo");
    }

    #[test]
    fn test_far_word_is_unchanged() {
        let corrector = corrector(0, "cat dog");
        let correction = corrector.correction("xylophone").unwrap();
        assert_eq!(correction.corrected, "xylophone");
        assert_eq!(correction.tier, CandidateTier::Unchanged);
        assert_eq!(correction.count, 0);
    }

    #[test]
    fn test_empty_corpus_returns_input() {
        let corrector = corrector(0, "");
        assert_eq!(corrector.correct_word("anything").unwrap(), "anything");
    }

    #[test]
    fn test_uninitialized_model_errors() {
        let corrector = Corrector::new(Arc::new(FrequencyModel::new(0).unwrap()));
        assert!(matches!(
            corrector.correct_word("word"),
            Err(AutocorrectError::UninitializedModel)
        ));
    }

    #[test]
    fn test_invalid_edit_distance() {
        let model = Arc::new(FrequencyModel::new(0).unwrap());
        assert!(Corrector::with_max_edit_distance(model, 3).is_err());
    }

    #[test]
    fn test_with_config_validates_first() {
        let model = Arc::new(FrequencyModel::new(0).unwrap());
        let negative = Config {
            min_threshold: -1,
            ..Config::default()
        };
        assert!(matches!(
            Corrector::with_config(model.clone(), &negative),
            Err(AutocorrectError::InvalidConfig(_))
        ));

        let shallow = Config {
            max_edit_distance: 1,
            ..Config::default()
        };
        let corrector = Corrector::with_config(model, &shallow).unwrap();
        assert_eq!(corrector.max_edit_distance(), 1);
    }

    #[test]
    fn test_sentence_passes_punctuation_through() {
        let corrector = corrector(0, "the quick brown fox");
        let tokens = ["teh", " ", "quikc", ", ", "!"];
        assert_eq!(
            corrector.correct_sentence(&tokens).unwrap(),
            vec!["the", " ", "quick", ", ", "!"]
        );
    }

    #[test]
    fn test_text_keeps_case_and_layout() {
        let corrector = corrector(0, "the quick brown fox jumps");
        assert_eq!(
            corrector.correct_text("Teh QUIK brown fox, jmups!").unwrap(),
            "The QUICK brown fox, jumps!"
        );
        assert_eq!(corrector.correct_text("The Fox").unwrap(), "The Fox");
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Teh", "the"), "The");
        assert_eq!(match_case("TEH", "the"), "THE");
        assert_eq!(match_case("I", "a"), "A");
        assert_eq!(match_case("teh", "the"), "the");
        assert_eq!(match_case("Éte", "été"), "Été");
    }
}
