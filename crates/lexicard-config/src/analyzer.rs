use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerProvider {
    /// OpenAI-compatible chat completions
    #[default]
    OpenAi,
    /// Synsets from the configured WordNet resource
    #[serde(alias = "wordnet")]
    Corpus,
}

impl std::str::FromStr for AnalyzerProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(AnalyzerProvider::OpenAi),
            "corpus" | "wordnet" => Ok(AnalyzerProvider::Corpus),
            other => Err(format!("unknown analyzer provider '{other}'")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyzerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: AnalyzerProvider,
    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: AnalyzerProvider::default(),
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: 0.0,
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("enabled", &self.enabled)
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AnalyzerConfig {
    /// True when the provider cannot run without an API key
    pub fn needs_api_key(&self) -> bool {
        self.provider == AnalyzerProvider::OpenAi
    }

    pub(crate) fn apply_env(&mut self) {
        match env::var("LEXICARD_ANALYZER").map(|v| v.parse::<AnalyzerProvider>()) {
            Ok(Ok(provider)) => self.provider = provider,
            Ok(Err(e)) => tracing::warn!("Ignoring LEXICARD_ANALYZER: {}", e),
            Err(_) => {}
        }
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            let key = key.trim();
            if !key.is_empty() {
                self.api_key = key.to_string();
            }
        }
        if let Some(model) = env::var("LEXICARD_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
        {
            self.model = model;
        }
    }
}
