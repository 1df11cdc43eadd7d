use crate::error::{AutocorrectError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

const APP_NAME: &str = "autocorrect";
const CONFIG_NAME: &str = "config";
const STATE_FILE: &str = "word_freq.tsv";

/// Deepest tier of the candidate cascade.
pub const MAX_EDIT_DISTANCE: i32 = 2;

/// Settings stored in the user's `autocorrect` config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_threshold: i64,
    pub max_edit_distance: i32,
    pub state_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_threshold: 1,
            max_edit_distance: MAX_EDIT_DISTANCE,
            state_path: None,
        }
    }
}

impl Config {
    /// Load the user's config file, falling back to defaults.
    ///
    /// A missing or unreadable file is logged and replaced by
    /// [`Config::default`], so this currently always returns `Ok`.
    pub fn load() -> Result<Self> {
        match confy::load(APP_NAME, Some(CONFIG_NAME)) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("Failed to load config, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    /// Write this configuration to the user's config file.
    ///
    /// # Errors
    /// `ConfigStore` if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)?;
        Ok(())
    }

    /// Location of the config file.
    ///
    /// # Errors
    /// `ConfigStore` if no config directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        Ok(confy::get_configuration_file_path(APP_NAME, Some(CONFIG_NAME))?)
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    /// `InvalidConfig` for a negative `min_threshold` or a
    /// `max_edit_distance` outside `0..=2`.
    pub fn validate(&self) -> Result<()> {
        if self.min_threshold < 0 {
            return Err(AutocorrectError::InvalidConfig(format!(
                "min_threshold must be zero or greater, got {}",
                self.min_threshold
            )));
        }
        if !(0..=MAX_EDIT_DISTANCE).contains(&self.max_edit_distance) {
            return Err(AutocorrectError::InvalidConfig(format!(
                "max_edit_distance must be between 0 and {MAX_EDIT_DISTANCE}, got {}",
                self.max_edit_distance
            )));
        }
        Ok(())
    }

    /// Where the frequency table is persisted.
    ///
    /// Falls back to the platform data directory, or the working directory
    /// when there is none.
    pub fn state_path(&self) -> PathBuf {
        if let Some(path) = &self.state_path {
            return path.clone();
        }

        match dirs::data_dir() {
            Some(mut path) => {
                path.push(APP_NAME);
                path.push(STATE_FILE);
                path
            }
            None => PathBuf::from(STATE_FILE),
        }
    }
}
