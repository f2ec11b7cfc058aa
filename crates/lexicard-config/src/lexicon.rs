use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Word lists merged into the lemmatizer lexicon on top of the embedded one
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LexiconConfig {
    #[serde(default)]
    pub additional_paths: Vec<PathBuf>,
}
