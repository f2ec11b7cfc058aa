use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_flush_every() -> usize {
    10
}

fn default_pause_min_ms() -> u64 {
    1000
}

fn default_pause_max_ms() -> u64 {
    2500
}

fn default_llm_pause_ms() -> u64 {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BatchConfig {
    /// Save the dataset after this many processed records
    #[serde(default = "default_flush_every")]
    pub flush_every: usize,
    /// Pause between dictionary requests, picked from this range
    #[serde(default = "default_pause_min_ms")]
    pub pause_min_ms: u64,
    #[serde(default = "default_pause_max_ms")]
    pub pause_max_ms: u64,
    /// Pause between analyzer requests
    #[serde(default = "default_llm_pause_ms")]
    pub llm_pause_ms: u64,
    /// Stop after this many fetched records
    #[serde(default)]
    pub limit: Option<usize>,
    /// Refetch records whose source slot is already populated
    #[serde(default)]
    pub force: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            flush_every: default_flush_every(),
            pause_min_ms: default_pause_min_ms(),
            pause_max_ms: default_pause_max_ms(),
            llm_pause_ms: default_llm_pause_ms(),
            limit: None,
            force: false,
        }
    }
}

impl BatchConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(every) = env::var("LEXICARD_FLUSH_EVERY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.flush_every = every;
        }
    }

    pub fn pause_range(&self) -> (Duration, Duration) {
        let min = self.pause_min_ms.min(self.pause_max_ms);
        let max = self.pause_min_ms.max(self.pause_max_ms);
        (Duration::from_millis(min), Duration::from_millis(max))
    }

    pub fn llm_pause(&self) -> Duration {
        Duration::from_millis(self.llm_pause_ms)
    }
}
