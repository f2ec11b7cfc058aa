use lexicard_types::Analysis;

/// Word analysis provider: an LLM or a lexical database
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Structured analysis of a single word
    async fn analyze(&self, word: &str) -> Result<Analysis, AnalyzeError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("API key not set. Export OPENAI_API_KEY or set analyzer.api_key")]
    ApiKeyNotSet,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No analysis available for '{0}'")]
    NotFound(String),
}

#[async_trait::async_trait]
impl<T: Analyzer + ?Sized> Analyzer for Box<T> {
    async fn analyze(&self, word: &str) -> Result<Analysis, AnalyzeError> {
        (**self).analyze(word).await
    }

    fn metadata(&self) -> ProviderMetadata {
        (**self).metadata()
    }
}

/// Parse the model's reply into an [`Analysis`].
///
/// Accepts bare JSON or JSON wrapped in a markdown code fence or prose.
pub fn parse_analysis(content: &str) -> Result<Analysis, AnalyzeError> {
    let json = extract_json_object(content)
        .ok_or_else(|| AnalyzeError::MalformedResponse("no JSON object in reply".to_string()))?;

    let analysis: Analysis = serde_json::from_str(json)
        .map_err(|e| AnalyzeError::MalformedResponse(format!("unexpected shape: {e}")))?;

    if analysis.most_common_meaning.is_none() && analysis.less_common_meanings.is_empty() {
        return Err(AnalyzeError::MalformedResponse(
            "reply has no meanings".to_string(),
        ));
    }

    Ok(analysis)
}

fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (start < end).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_reply() {
        let reply = r#"Here you go:
```json
{
  "most_common_meaning": {"part_of_speech": "Verb", "definition": "跑 (to move fast)", "example": "He runs every morning."},
  "less_common_meanings": [{"part_of_speech": "Verb", "definition": "經營 (to manage)", "example": "She runs a small shop."}],
  "word_family": [{"word": "runner", "part_of_speech": "Noun", "definition": "跑者"}],
  "related_phrases": [{"phrase": "run out of", "definition": "用完", "example": "We ran out of milk."}]
}
```"#;

        let analysis = parse_analysis(reply).unwrap();

        assert_eq!(analysis.less_common_meanings.len(), 1);
        assert_eq!(analysis.word_family[0].word, "runner");
        assert_eq!(analysis.related_phrases[0].phrase, "run out of");
    }

    #[test]
    fn test_reply_without_json_is_malformed() {
        let err = parse_analysis("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, AnalyzeError::MalformedResponse(_)));
    }

    #[test]
    fn test_reply_without_meanings_is_malformed() {
        let err = parse_analysis(r#"{"word_family": []}"#).unwrap_err();
        assert!(err.to_string().contains("no meanings"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = parse_analysis(r#"{"less_common_meanings": "none"}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected shape"));
    }
}
