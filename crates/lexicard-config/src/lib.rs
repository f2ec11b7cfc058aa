use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::analyzer::{AnalyzerConfig, AnalyzerProvider};
use self::batch::BatchConfig;
use self::dictionary::DictionaryConfig;
use self::lexicon::LexiconConfig;
use self::paths::PathsConfig;
use self::wordnet::WordNetConfig;

pub mod analyzer;
pub mod batch;
pub mod dictionary;
pub mod lexicon;
pub mod paths;
pub mod wordnet;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub dictionary: DictionaryConfig,
    pub analyzer: AnalyzerConfig,
    pub lexicon: LexiconConfig,
    pub wordnet: WordNetConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Defaults, then the JSON file if given, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.flush_every == 0 {
            return Err(ConfigError::Invalid {
                field: "batch.flush_every",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.dictionary.enabled && self.dictionary.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "dictionary.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.analyzer.enabled
            && self.analyzer.provider == AnalyzerProvider::Corpus
            && self.wordnet.path.is_none()
        {
            return Err(ConfigError::Invalid {
                field: "wordnet.path",
                reason: "the corpus analyzer needs a WordNet resource".to_string(),
            });
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        self.paths.apply_env();
        self.analyzer.apply_env();
        self.wordnet.apply_env();
        self.batch.apply_env();
    }
}
