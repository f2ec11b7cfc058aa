use lexicard_types::CambridgeEntry;

/// Source of dictionary meanings for a word
#[async_trait::async_trait]
pub trait DictionaryFetcher: Send + Sync {
    /// Meanings with example sentences, or `Ok(None)` when the dictionary
    /// has no usable entry for the word
    async fn fetch(&self, word: &str) -> Result<Option<CambridgeEntry>, FetchError>;

    /// Provider metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Rate limit exceeded")]
    RateLimited,
}
