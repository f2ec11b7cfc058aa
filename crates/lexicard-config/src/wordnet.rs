use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Exported WordNet resource. Feeds the corpus analyzer and gives the
/// lemmatizer lemmas keyed by part of speech.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WordNetConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl WordNetConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(path) = env::var("LEXICARD_WORDNET")
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            self.path = Some(PathBuf::from(path));
        }
    }
}
