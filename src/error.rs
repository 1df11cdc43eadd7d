//! Error types for the autocorrect library.

use thiserror::Error;

/// Result type alias for autocorrect operations.
pub type Result<T> = std::result::Result<T, AutocorrectError>;

/// Errors surfaced by the frequency model, corrector and configuration.
///
/// None of these are transient, so nothing is retried internally.
#[derive(Error, Debug)]
pub enum AutocorrectError {
    /// A threshold or edit distance outside its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Corpus input that cannot be turned into text.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation that needs learned data ran before `learn` or `load`.
    #[error("Model is not initialized: call learn or load first")]
    UninitializedModel,

    /// A malformed line in a persisted frequency file.
    #[error("Corrupt state at line {line}: {reason}")]
    CorruptState { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config storage error: {0}")]
    ConfigStore(#[from] confy::ConfyError),
}

impl AutocorrectError {
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        AutocorrectError::CorruptState {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_message_names_line() {
        let err = AutocorrectError::corrupt(7, "missing tab separator");
        assert_eq!(
            err.to_string(),
            "Corrupt state at line 7: missing tab separator"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here/word_freq.tsv")?)
        }
        assert!(matches!(open_missing(), Err(AutocorrectError::Io(_))));
    }
}
