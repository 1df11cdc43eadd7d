//! Lossless split of free text into word and non-word tokens.
//!
//! Word tokens are the same `\w+` runs that learning counts. Everything in
//! between (spaces, punctuation, line breaks) is kept as its own token so
//! `detokenize(tokenize(text)) == text`.

use crate::corpus::word_regex;

pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in word_regex().find_iter(text) {
        if m.start() > last {
            tokens.push(&text[last..m.start()]);
        }
        tokens.push(m.as_str());
        last = m.end();
    }

    if last < text.len() {
        tokens.push(&text[last..]);
    }

    tokens
}

/// True if `token` holds at least one word character.
pub fn is_word_token(token: &str) -> bool {
    word_regex().is_match(token)
}

pub fn detokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(|t| t.as_ref()).collect()
}
