use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_word_list() -> PathBuf {
    PathBuf::from("extracted.txt")
}

fn default_dataset() -> PathBuf {
    PathBuf::from("data/words.json")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// Newline-delimited word list
    #[serde(default = "default_word_list")]
    pub word_list: PathBuf,
    /// JSON array of word records
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            word_list: default_word_list(),
            dataset: default_dataset(),
        }
    }
}

impl PathsConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(path) = env::var("LEXICARD_WORD_LIST") {
            self.word_list = PathBuf::from(path);
        }
        if let Ok(path) = env::var("LEXICARD_DATASET") {
            self.dataset = PathBuf::from(path);
        }
    }
}
