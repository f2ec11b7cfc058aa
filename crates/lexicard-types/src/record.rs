use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the dataset file, keyed by `word`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Empty when the stored record lacks it; such records are skipped
    #[serde(default)]
    pub word: String,
    /// LLM or corpus analysis, `null` until the analyze step runs
    #[serde(default)]
    pub analysis: Option<Analysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cambridge: Option<CambridgeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizEntry>,
    /// Keys written by other tools, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WordRecord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            analysis: None,
            cambridge: None,
            quiz: None,
            extra: Map::new(),
        }
    }

    /// Lookup key: the word lowercased
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub most_common_meaning: Option<MeaningEntry>,
    #[serde(default)]
    pub less_common_meanings: Vec<MeaningEntry>,
    #[serde(default)]
    pub word_family: Vec<WordFamilyEntry>,
    #[serde(default)]
    pub related_phrases: Vec<PhraseEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeaningEntry {
    #[serde(default)]
    pub part_of_speech: String,
    /// May be bilingual, e.g. `"跑 (to move fast)"`
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl MeaningEntry {
    /// The example sentence, if present and non-empty
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref().filter(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordFamilyEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseEntry {
    #[serde(default)]
    pub phrase: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Dictionary scrape result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CambridgeEntry {
    #[serde(default)]
    pub meanings: Vec<CambridgeMeaning>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CambridgeMeaning {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl CambridgeMeaning {
    pub fn first_example(&self) -> Option<&str> {
        self.examples
            .first()
            .map(String::as_str)
            .filter(|e| !e.trim().is_empty())
    }
}

/// Fill-in-the-blank card data. `target_word` occurs verbatim in `example`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizEntry {
    pub example: String,
    pub target_word: String,
}
