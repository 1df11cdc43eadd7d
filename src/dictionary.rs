//! Word frequency model: learning, pruning, and persistence.
//!
//! The model counts how often each word occurs in the training corpus. Only
//! words seen at least `min_threshold` times form the lookup table that the
//! corrector draws candidates from.
//!
//! # State File Format
//!
//! The frequency table is stored as UTF-8 text, one entry per line:
//! ```text
//! the	1200
//! quick	31
//! ```
//! Word and count are separated by a single tab, with no surrounding
//! whitespace. Blank lines are ignored.
//!
//! # Generations
//!
//! All derived tables live in an immutable [`Generation`]. `learn`, `update`
//! and `load` build a complete new generation and then swap it in, so a
//! reader holding a snapshot never sees the frequency table and lookup table
//! of two different generations.

use crate::corpus::Corpus;
use crate::error::{AutocorrectError, Result};
use crate::letters::{Alphabet, LetterSet};
use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use std::cmp::Reverse;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// How many words `summary` lists.
pub const SUMMARY_TOP_WORDS: usize = 20;

/// One consistent version of the model's tables.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Cumulative count of every learned word.
    word_freq: AHashMap<String, u64>,
    /// Words with count >= threshold. Its key set is the lookup word set.
    lookup: AHashMap<String, u64>,
    letters: LetterSet,
    total_words: u64,
    lookup_total: u64,
}

fn checked_total<'a>(mut counts: impl Iterator<Item = &'a u64>) -> Result<u64> {
    counts
        .try_fold(0u64, |total, &count| total.checked_add(count))
        .ok_or_else(|| AutocorrectError::InvalidInput("total word count overflows u64".to_string()))
}

/// Add one occurrence per word to `word_freq`.
///
/// # Errors
/// `InvalidInput` if a count would overflow `u64`.
fn add_words(word_freq: &mut AHashMap<String, u64>, words: &[String]) -> Result<()> {
    for word in words {
        let count = word_freq.entry(word.clone()).or_insert(0);
        *count = count.checked_add(1).ok_or_else(|| {
            AutocorrectError::InvalidInput(format!("count for {word:?} overflows u64"))
        })?;
    }
    Ok(())
}

impl Generation {
    /// Derive the lookup table and totals from a frequency table.
    ///
    /// # Errors
    /// `InvalidInput` if the counts sum past `u64::MAX`.
    fn build(
        word_freq: AHashMap<String, u64>,
        letters: LetterSet,
        min_threshold: u64,
    ) -> Result<Self> {
        let lookup: AHashMap<String, u64> = word_freq
            .iter()
            .filter(|&(_, &count)| count >= min_threshold)
            .map(|(word, &count)| (word.clone(), count))
            .collect();

        let total_words = checked_total(word_freq.values())?;
        let lookup_total = checked_total(lookup.values())?;

        debug!(
            words = word_freq.len(),
            lookup_words = lookup.len(),
            letters = letters.len(),
            "built model generation"
        );

        Ok(Self {
            word_freq,
            lookup,
            letters,
            total_words,
            lookup_total,
        })
    }

    /// Occurrences of `word` in the full frequency table.
    pub fn count(&self, word: &str) -> u64 {
        self.word_freq.get(word).copied().unwrap_or(0)
    }

    /// Count of `word` if it survived pruning.
    pub fn lookup_count(&self, word: &str) -> Option<u64> {
        self.lookup.get(word).copied()
    }

    /// Whether `word` is a valid correction target.
    pub fn is_known(&self, word: &str) -> bool {
        self.lookup.contains_key(word)
    }

    /// Relative frequency of `word` among lookup words, 0.0 if unknown.
    pub fn probability(&self, word: &str) -> f64 {
        match self.lookup.get(word) {
            Some(&count) if self.lookup_total > 0 => count as f64 / self.lookup_total as f64,
            _ => 0.0,
        }
    }

    /// Characters seen in learned words.
    pub fn letters(&self) -> &LetterSet {
        &self.letters
    }

    /// Edit alphabet for this generation.
    pub fn alphabet(&self) -> Alphabet {
        self.letters.alphabet()
    }

    /// Total word occurrences across the frequency table.
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Sum of counts in the lookup table.
    pub fn lookup_total(&self) -> u64 {
        self.lookup_total
    }

    /// Distinct words in the frequency table.
    pub fn word_count(&self) -> usize {
        self.word_freq.len()
    }

    /// Words at or above the threshold.
    pub fn lookup_len(&self) -> usize {
        self.lookup.len()
    }

    /// The lookup word set, in no particular order.
    pub fn lookup_words(&self) -> impl Iterator<Item = &str> {
        self.lookup.keys().map(String::as_str)
    }

    /// The full frequency table, pruned words included.
    pub fn frequencies(&self) -> &AHashMap<String, u64> {
        &self.word_freq
    }

    /// Entries sorted by descending count, ties by ascending word.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .word_freq
            .iter()
            .map(|(word, &count)| (word.as_str(), count))
            .collect();
        entries.sort_by_key(|&(word, count)| (Reverse(count), word));
        entries
    }
}

/// Word frequency model shared between learners and correctors.
pub struct FrequencyModel {
    min_threshold: u64,
    current: RwLock<Option<Arc<Generation>>>,
    /// Serializes learn/update/load so updates never lose counts.
    writer: Mutex<()>,
}

impl FrequencyModel {
    /// Create an empty model; nothing is known until `learn` or `load`.
    ///
    /// # Errors
    /// `InvalidConfig` if `min_threshold` is negative.
    pub fn new(min_threshold: i64) -> Result<Self> {
        let min_threshold = u64::try_from(min_threshold).map_err(|_| {
            AutocorrectError::InvalidConfig(format!(
                "min_threshold must be zero or greater, got {min_threshold}"
            ))
        })?;

        Ok(Self {
            min_threshold,
            current: RwLock::new(None),
            writer: Mutex::new(()),
        })
    }

    /// Create a model and load its state from `path`.
    ///
    /// # Errors
    /// Same as [`FrequencyModel::new`] and [`FrequencyModel::load`].
    ///
    /// # Example
    /// ```rust,no_run
    /// use autocorrect::FrequencyModel;
    ///
    /// let model = FrequencyModel::from_file(1, "word_freq.tsv".as_ref())?;
    /// println!("{}", model.summary()?);
    /// # Ok::<(), autocorrect::AutocorrectError>(())
    /// ```
    pub fn from_file(min_threshold: i64, path: &Path) -> Result<Self> {
        let model = Self::new(min_threshold)?;
        model.load(path)?;
        Ok(model)
    }

    /// Minimum count for a word to be a correction target.
    pub fn min_threshold(&self) -> u64 {
        self.min_threshold
    }

    /// Whether `learn` or `load` has run.
    pub fn is_initialized(&self) -> bool {
        self.current.read().is_some()
    }

    /// The current generation.
    ///
    /// # Errors
    /// `UninitializedModel` before the first `learn` or `load`.
    pub fn snapshot(&self) -> Result<Arc<Generation>> {
        self.current
            .read()
            .clone()
            .ok_or(AutocorrectError::UninitializedModel)
    }

    fn publish(&self, generation: Generation) {
        *self.current.write() = Some(Arc::new(generation));
    }

    /// Learn word counts from `corpus`, replacing any previous state.
    ///
    /// # Errors
    /// `InvalidInput` if a count overflows; the previous state is kept.
    ///
    /// # Example
    /// ```rust
    /// use autocorrect::FrequencyModel;
    ///
    /// let model = FrequencyModel::new(0)?;
    /// model.learn("the cat and the hat")?;
    /// assert_eq!(model.snapshot()?.count("the"), 2);
    /// # Ok::<(), autocorrect::AutocorrectError>(())
    /// ```
    pub fn learn(&self, corpus: impl Into<Corpus>) -> Result<()> {
        let words = corpus.into().words();
        let _guard = self.writer.lock();

        let mut word_freq: AHashMap<String, u64> = AHashMap::new();
        add_words(&mut word_freq, &words)?;
        let letters = LetterSet::from_words(&words);

        info!(
            tokens = words.len(),
            distinct = word_freq.len(),
            "learned corpus"
        );
        self.publish(Generation::build(word_freq, letters, self.min_threshold)?);
        Ok(())
    }

    /// Add the word counts of `corpus` to the learned counts.
    ///
    /// # Errors
    /// `UninitializedModel` if nothing was learned or loaded yet,
    /// `InvalidInput` if a count or the total would overflow.
    pub fn update(&self, corpus: impl Into<Corpus>) -> Result<()> {
        let words = corpus.into().words();
        let _guard = self.writer.lock();
        let current = self.snapshot()?;

        let mut word_freq = current.word_freq.clone();
        add_words(&mut word_freq, &words)?;
        let letters = current.letters.union(&LetterSet::from_words(&words));

        info!(
            tokens = words.len(),
            distinct = word_freq.len(),
            "updated model"
        );
        self.publish(Generation::build(word_freq, letters, self.min_threshold)?);
        Ok(())
    }

    /// Write the frequency table to `path`, one `word\tcount` line per entry.
    ///
    /// The file is written next to its destination and renamed into place.
    ///
    /// # Errors
    /// `UninitializedModel` before any learn or load, `Io` if writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let generation = self.snapshot()?;

        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            for (word, count) in generation.ranked() {
                writeln!(writer, "{word}\t{count}")?;
            }
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| e.error)?;

        info!(
            path = %path.display(),
            words = generation.word_count(),
            "saved frequency table"
        );
        Ok(())
    }

    /// Replace the model state with the table stored at `path`.
    ///
    /// The whole file is parsed before anything is published; on error the
    /// previous state is left as it was.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `CorruptState` on a malformed line,
    /// a line that is not UTF-8, or counts whose total overflows `u64`.
    pub fn load(&self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut word_freq: AHashMap<String, u64> = AHashMap::new();
        let mut total: u64 = 0;
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    AutocorrectError::corrupt(line_no, "line is not valid UTF-8")
                }
                _ => AutocorrectError::Io(e),
            })?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.is_empty() {
                continue;
            }

            let (word, count) = parse_state_line(line, line_no)?;
            if let Some(previous) = word_freq.insert(word.to_string(), count) {
                warn!(line = line_no, word, "duplicate word in state file, keeping last count");
                total -= previous;
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| AutocorrectError::corrupt(line_no, "counts overflow the table total"))?;
        }

        let letters = LetterSet::from_words(word_freq.keys());
        let _guard = self.writer.lock();

        info!(
            path = %path.display(),
            words = word_freq.len(),
            "loaded frequency table"
        );
        self.publish(Generation::build(word_freq, letters, self.min_threshold)?);
        Ok(())
    }

    /// The `n` most frequent words, ties by ascending word.
    ///
    /// # Errors
    /// `UninitializedModel` before any learn or load.
    pub fn most_common(&self, n: usize) -> Result<Vec<(String, u64)>> {
        let generation = self.snapshot()?;
        Ok(generation
            .ranked()
            .into_iter()
            .take(n)
            .map(|(word, count)| (word.to_string(), count))
            .collect())
    }

    /// Read-only report of the learned data.
    ///
    /// # Errors
    /// `UninitializedModel` before any learn or load.
    pub fn summary(&self) -> Result<Summary> {
        let generation = self.snapshot()?;
        let most_common = generation
            .ranked()
            .into_iter()
            .take(SUMMARY_TOP_WORDS)
            .map(|(word, count)| (word.to_string(), count))
            .collect();

        Ok(Summary {
            total_words: generation.total_words(),
            distinct_words: generation.word_count(),
            lookup_words: generation.lookup_len(),
            min_threshold: self.min_threshold,
            letters: generation.letters().iter().collect(),
            extra_letters: generation.letters().extra_letters(),
            most_common,
        })
    }
}

fn parse_state_line(line: &str, line_no: usize) -> Result<(&str, u64)> {
    let mut parts = line.split('\t');
    let (word, count) = match (parts.next(), parts.next(), parts.next()) {
        (Some(word), Some(count), None) => (word, count),
        (_, None, _) => return Err(AutocorrectError::corrupt(line_no, "missing tab separator")),
        _ => return Err(AutocorrectError::corrupt(line_no, "more than one tab separator")),
    };

    if word.is_empty() {
        return Err(AutocorrectError::corrupt(line_no, "empty word"));
    }

    let count = count.parse::<u64>().map_err(|e| {
        AutocorrectError::corrupt(line_no, format!("invalid count {count:?}: {e}"))
    })?;

    Ok((word, count))
}

/// Snapshot statistics produced by [`FrequencyModel::summary`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_words: u64,
    pub distinct_words: usize,
    pub lookup_words: usize,
    pub min_threshold: u64,
    pub letters: Vec<char>,
    /// Learned letters outside `a`..=`z`.
    pub extra_letters: Vec<char>,
    pub most_common: Vec<(String, u64)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of words: {}", self.total_words)?;
        writeln!(
            f,
            "Distinct words: {} ({} at or above threshold {})",
            self.distinct_words, self.lookup_words, self.min_threshold
        )?;
        writeln!(f)?;

        let letters: String = self.letters.iter().collect();
        writeln!(f, "Number of letters: {}", self.letters.len())?;
        writeln!(f, "{letters}")?;
        let extra: String = self.extra_letters.iter().collect();
        writeln!(
            f,
            "Letters other than a-z: {} {}",
            self.extra_letters.len(),
            extra
        )?;
        writeln!(f)?;

        writeln!(f, "Most common words:")?;
        for (word, count) in &self.most_common {
            writeln!(f, "  {word}\t{count}")?;
        }
        Ok(())
    }
}
