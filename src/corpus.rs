//! Corpus input accepted by `learn` and `update`, and the word scan.

use crate::error::{AutocorrectError, Result};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

/// Matches runs of word characters (Unicode alphanumerics and `_`).
pub(crate) fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Training text, either as one blob or as pre-split pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    Text(String),
    /// Joined with single spaces before scanning.
    Tokens(Vec<String>),
}

impl Corpus {
    /// Decode raw bytes as UTF-8 text.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        String::from_utf8(bytes)
            .map(Corpus::Text)
            .map_err(|e| AutocorrectError::InvalidInput(format!("corpus is not UTF-8: {e}")))
    }

    /// Read a corpus file; `-` reads standard input.
    pub fn read(path: &Path) -> Result<Self> {
        let mut bytes = Vec::new();
        if path == Path::new("-") {
            std::io::stdin().read_to_end(&mut bytes)?;
        } else {
            std::fs::File::open(path)?.read_to_end(&mut bytes)?;
        }
        Self::from_bytes(bytes)
    }

    pub fn into_text(self) -> String {
        match self {
            Corpus::Text(text) => text,
            Corpus::Tokens(tokens) => tokens.join(" "),
        }
    }

    /// Lowercased word tokens in corpus order.
    pub fn words(self) -> Vec<String> {
        extract_words(&self.into_text())
    }
}

impl From<String> for Corpus {
    fn from(text: String) -> Self {
        Corpus::Text(text)
    }
}

impl From<&str> for Corpus {
    fn from(text: &str) -> Self {
        Corpus::Text(text.to_string())
    }
}

impl From<Vec<String>> for Corpus {
    fn from(tokens: Vec<String>) -> Self {
        Corpus::Tokens(tokens)
    }
}

impl From<&[&str]> for Corpus {
    fn from(tokens: &[&str]) -> Self {
        Corpus::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Corpus {
    fn from(tokens: [&str; N]) -> Self {
        Corpus::from(&tokens[..])
    }
}

/// Case-fold `text` and return every `\w+` run.
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_words_lowercases_and_strips_punctuation() {
        let words = extract_words("The quick, brown FOX! snake_case 42");
        assert_eq!(
            words,
            vec!["the", "quick", "brown", "fox", "snake_case", "42"]
        );
    }

    #[test]
    fn test_extract_words_handles_unicode() {
        assert_eq!(extract_words("Café  Ñandú"), vec!["café", "ñandú"]);
    }

    #[test]
    fn test_tokens_are_joined_with_spaces() {
        let corpus = Corpus::from(["hello", "world,again"]);
        assert_eq!(corpus.clone().into_text(), "hello world,again");
        assert_eq!(corpus.words(), vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = Corpus::from_bytes(vec![0x66, 0x6f, 0xff]).unwrap_err();
        assert!(matches!(err, AutocorrectError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_text_has_no_words() {
        assert!(Corpus::from("  ...  ").words().is_empty());
    }
}
