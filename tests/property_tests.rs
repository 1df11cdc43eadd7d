//! Property-based tests for the frequency model and candidate generator.
//!
//! These tests verify invariants that must hold for all inputs:
//! - The lookup table is exactly the words at or above the threshold
//! - Known words correct to themselves
//! - Raw edit counts follow the closed-form formula
//! - Saving and loading preserves the lookup table
//!
//! Run with: cargo test --test property_tests

use autocorrect::edits::{edits1, raw_edit_count, raw_edits1};
use autocorrect::{Alphabet, Corrector, FrequencyModel};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,4}", 0..40)
}

fn expected_counts(words: &[String]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for word in words {
        *counts.entry(word.clone()).or_insert(0) += 1;
    }
    counts
}

proptest! {
    /// Invariant: lookup words are exactly those with count >= threshold
    #[test]
    fn lookup_matches_threshold(words in corpus_strategy(), threshold in 0i64..5) {
        let model = FrequencyModel::new(threshold).unwrap();
        model.learn(words.clone()).unwrap();
        let generation = model.snapshot().unwrap();

        let counts = expected_counts(&words);
        for (word, &count) in &counts {
            prop_assert_eq!(generation.count(word), count);
            prop_assert_eq!(generation.is_known(word), count >= threshold as u64);
        }
        for word in generation.lookup_words() {
            prop_assert!(counts.contains_key(word));
        }
    }

    /// Invariant: a known word is its own correction
    #[test]
    fn known_words_are_fixed_points(words in prop::collection::vec("[a-z]{1,6}", 1..20)) {
        let model = FrequencyModel::new(0).unwrap();
        model.learn(words.clone()).unwrap();
        let corrector = Corrector::new(Arc::new(model));

        for word in &words {
            prop_assert_eq!(&corrector.correct_word(word).unwrap(), word);
        }
    }

    /// Invariant: raw edits follow the formula and dedup never adds entries
    #[test]
    fn raw_edit_count_formula(word in "[a-z]{0,8}") {
        let alphabet = Alphabet::base();
        let n = word.chars().count();
        let raw = raw_edits1(&word, &alphabet);

        prop_assert_eq!(raw.len(), raw_edit_count(n, alphabet.len()));
        prop_assert!(edits1(&word, &alphabet).len() <= raw.len());
    }

    /// Invariant: save then load reproduces the lookup table
    #[test]
    fn save_load_round_trip(words in corpus_strategy(), threshold in 0i64..4) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word_freq.tsv");

        let model = FrequencyModel::new(threshold).unwrap();
        model.learn(words).unwrap();
        model.save(&path).unwrap();
        let restored = FrequencyModel::from_file(threshold, &path).unwrap();

        let left = model.snapshot().unwrap();
        let right = restored.snapshot().unwrap();
        prop_assert_eq!(left.frequencies(), right.frequencies());

        let mut left_lookup: Vec<&str> = left.lookup_words().collect();
        let mut right_lookup: Vec<&str> = right.lookup_words().collect();
        left_lookup.sort_unstable();
        right_lookup.sort_unstable();
        prop_assert_eq!(left_lookup, right_lookup);
    }

    /// Invariant: update is equivalent to learning the concatenated corpus
    #[test]
    fn update_accumulates(first in corpus_strategy(), second in corpus_strategy()) {
        let updated = FrequencyModel::new(1).unwrap();
        updated.learn(first.clone()).unwrap();
        updated.update(second.clone()).unwrap();

        let mut all = first;
        all.extend(second);
        let learned = FrequencyModel::new(1).unwrap();
        learned.learn(all).unwrap();

        let updated_snapshot = updated.snapshot().unwrap();
        let learned_snapshot = learned.snapshot().unwrap();
        prop_assert_eq!(
            updated_snapshot.frequencies(),
            learned_snapshot.frequencies()
        );
    }
}
