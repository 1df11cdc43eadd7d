//! Candidate generation: every string within one or two edits of a word.
//!
//! The four edit operations are delete, transpose (adjacent swap), replace
//! and insert. Replace and insert draw from an [`Alphabet`]. Words are handled
//! as `char` sequences so multi-byte letters are edited whole.
//!
//! Nothing here normalizes case; callers lowercase first.

use crate::letters::Alphabet;
use ahash::AHashSet;

/// Number of raw distance-1 edits for a word of `len` chars over an alphabet
/// of `alphabet_len` letters, before duplicates collapse.
pub fn raw_edit_count(len: usize, alphabet_len: usize) -> usize {
    let deletes = len;
    let transposes = len.saturating_sub(1);
    let replaces = len * alphabet_len;
    let inserts = (len + 1) * alphabet_len;
    deletes + transposes + replaces + inserts
}

fn join(left: &[char], middle: &[char], right: &[char]) -> String {
    let mut out = String::with_capacity((left.len() + middle.len() + right.len()) * 4);
    out.extend(left);
    out.extend(middle);
    out.extend(right);
    out
}

/// Every distance-1 edit of `word`, duplicates included.
///
/// Ordered as deletes, transposes, replaces, inserts. Replacing a character
/// with itself is not skipped, so the word itself shows up among the
/// replaces whenever it is non-empty.
pub fn raw_edits1(word: &str, alphabet: &Alphabet) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let letters = alphabet.chars();
    let mut edits = Vec::with_capacity(raw_edit_count(n, letters.len()));

    for i in 0..n {
        edits.push(join(&chars[..i], &[], &chars[i + 1..]));
    }

    for i in 0..n.saturating_sub(1) {
        edits.push(join(&chars[..i], &[chars[i + 1], chars[i]], &chars[i + 2..]));
    }

    for i in 0..n {
        for &c in letters {
            edits.push(join(&chars[..i], &[c], &chars[i + 1..]));
        }
    }

    for i in 0..=n {
        for &c in letters {
            edits.push(join(&chars[..i], &[c], &chars[i..]));
        }
    }

    edits
}

/// Distinct strings one edit away from `word`.
pub fn edits1(word: &str, alphabet: &Alphabet) -> AHashSet<String> {
    raw_edits1(word, alphabet).into_iter().collect()
}

/// Lazily yields every distance-1 edit of every distance-1 edit of `word`.
///
/// Only the first tier is materialized; the second is produced on demand so
/// a consumer can filter it without holding the full set.
pub fn edits2_iter<'a>(word: &str, alphabet: &'a Alphabet) -> impl Iterator<Item = String> + 'a {
    edits1(word, alphabet)
        .into_iter()
        .flat_map(move |e1| raw_edits1(&e1, alphabet))
}

/// Distinct strings reachable with two edits.
///
/// Not filtered against [`edits1`]: it also contains most distance-1 edits
/// and the word itself.
pub fn edits2(word: &str, alphabet: &Alphabet) -> AHashSet<String> {
    edits2_iter(word, alphabet).collect()
}
