//! Letter inventory used to synthesize replace and insert edits.
//!
//! The edit alphabet is the fixed base alphabet `a`..=`z` widened by every
//! character seen in learned words, so a corpus with accented letters or
//! digits can still be corrected into.

use std::collections::BTreeSet;
use std::fmt;

/// Lowercase ASCII letters, always part of the edit alphabet.
pub const BASE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Characters observed across all learned words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterSet {
    letters: BTreeSet<char>,
}

impl LetterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the characters of every word.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend_words(words);
        set
    }

    pub fn extend_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.letters.extend(word.as_ref().chars());
        }
    }

    pub fn union(&self, other: &LetterSet) -> LetterSet {
        LetterSet {
            letters: self.letters.union(&other.letters).copied().collect(),
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    /// Letters that the base alphabet does not already cover.
    pub fn extra_letters(&self) -> Vec<char> {
        self.iter().filter(|c| !BASE_ALPHABET.contains(*c)).collect()
    }

    /// The full edit alphabet: base letters plus everything learned.
    pub fn alphabet(&self) -> Alphabet {
        let mut chars: BTreeSet<char> = BASE_ALPHABET.chars().collect();
        chars.extend(self.letters.iter().copied());
        Alphabet {
            chars: chars.into_iter().collect(),
        }
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.letters {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Sorted, duplicate-free characters used for replace and insert edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// The base alphabet with nothing learned on top.
    pub fn base() -> Self {
        LetterSet::new().alphabet()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
