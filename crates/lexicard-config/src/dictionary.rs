use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://dictionary.cambridge.org/dictionary/english-chinese-traditional".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Entry pages live at `{base_url}/{word}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
