//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Directory holding the persisted bucket files.
    pub data_dir: PathBuf,
    /// Response-language instruction passed to the feedback prompt.
    pub feedback_language: String,
    /// Word-count ceiling for feedback responses.
    pub feedback_word_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            feedback_language: "Roman Urdu (Urdu written in Latin script)".to_string(),
            feedback_word_limit: 100,
        }
    }
}

impl TrackerConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// - `ROUTINE_DATA_DIR` — bucket directory
    /// - `ROUTINE_FEEDBACK_LANGUAGE` — response-language instruction
    /// - `ROUTINE_FEEDBACK_WORDS` — word ceiling (must parse as an integer)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ROUTINE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(language) = std::env::var("ROUTINE_FEEDBACK_LANGUAGE") {
            config.feedback_language = language;
        }
        if let Ok(words) = std::env::var("ROUTINE_FEEDBACK_WORDS") {
            config.feedback_word_limit =
                words.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ROUTINE_FEEDBACK_WORDS".to_string(),
                    message: format!("expected an integer, got {words:?}"),
                })?;
        }

        Ok(config)
    }
}
