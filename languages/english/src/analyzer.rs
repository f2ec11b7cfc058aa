use std::time::Duration;

use async_trait::async_trait;
use lexicard_analyzer::{AnalyzeError, Analyzer, ProviderMetadata, parse_analysis};
use lexicard_types::Analysis;
use reqwest::{Client, StatusCode};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 60_000;

const SYSTEM_PROMPT: &str =
    "You are a vocabulary expert for Taiwanese college entrance exams. Reply with JSON only.";

const PROMPT_TEMPLATE: &str = r#"Analyze the English word "{word}" for a student preparing for the exam.
Return a JSON object with exactly these keys:
{
  "most_common_meaning": {"part_of_speech": "...", "definition": "Traditional Chinese definition", "example": "English sentence using the word"},
  "less_common_meanings": [{"part_of_speech": "...", "definition": "...", "example": "..."}],
  "word_family": [{"word": "...", "part_of_speech": "...", "definition": "..."}],
  "related_phrases": [{"phrase": "...", "definition": "...", "example": "..."}]
}
Examples must be plain English sentences without translation. Only list phrases found in standard learner dictionaries."#;

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Word analysis through an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct EnglishAnalyzer {
    client: Client,
    api_url: String,
    api_key: ApiKey,
    model: String,
    temperature: f32,
    max_retries: u32,
}

impl EnglishAnalyzer {
    pub fn new(api_url: &str, api_key: &str, model: &str, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            api_key: ApiKey(api_key.trim().to_string()),
            model: model.to_string(),
            temperature,
            max_retries: MAX_RETRIES,
        }
    }

    /// Number of attempts for rate-limited or 5xx responses, at least one
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    async fn complete(&self, word: &str) -> Result<String, AnalyzeError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": PROMPT_TEMPLATE.replace("{word}", word)},
            ],
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key.0)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Analyzer rate limited");
            return Err(AnalyzeError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| text.chars().take(200).collect());
            return Err(AnalyzeError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalyzeError::MalformedResponse(format!("not JSON: {e}")))?;

        json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| AnalyzeError::MalformedResponse("no message content".to_string()))
    }
}

#[async_trait]
impl Analyzer for EnglishAnalyzer {
    async fn analyze(&self, word: &str) -> Result<Analysis, AnalyzeError> {
        if self.api_key.0.is_empty() {
            return Err(AnalyzeError::ApiKeyNotSet);
        }

        let mut last_err = None;
        for attempt in 0..self.max_retries {
            match self.complete(word).await {
                Ok(content) => {
                    tracing::debug!(word, model = %self.model, "analysis received");
                    return parse_analysis(&content);
                }
                Err(e) if is_retriable(&e) => {
                    last_err = Some(e);
                    if attempt + 1 < self.max_retries {
                        let delay_ms = jittered_backoff(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            delay_ms,
                            "retrying after transient error"
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or(AnalyzeError::RateLimited))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "openai".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

fn is_retriable(e: &AnalyzeError) -> bool {
    matches!(
        e,
        AnalyzeError::RateLimited
            | AnalyzeError::Api {
                code: 500..=599,
                ..
            }
    )
}

/// Equal jitter backoff: base/2 + rand(0, base/2), base capped at a minute.
fn jittered_backoff(attempt: u32) -> u64 {
    let base = INITIAL_BACKOFF_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_BACKOFF_MS);
    let half = base / 2;
    half + fastrand::u64(..half.max(1))
}
