use std::time::Duration;

use lexicard_analyzer::{AnalyzeError, Analyzer};
use lexicard_core::{Source, SourceUpdate};
use lexicard_dictionary::DictionaryFetcher;

use crate::pipeline::EnrichmentStep;

/// Dictionary lookups with a randomized pause between requests
pub struct DictionaryStep<F> {
    fetcher: F,
    pause_min: Duration,
    pause_max: Duration,
}

impl<F: DictionaryFetcher> DictionaryStep<F> {
    pub fn new(fetcher: F, (pause_min, pause_max): (Duration, Duration)) -> Self {
        Self {
            fetcher,
            pause_min,
            pause_max,
        }
    }
}

#[async_trait::async_trait]
impl<F: DictionaryFetcher> EnrichmentStep for DictionaryStep<F> {
    fn source(&self) -> Source {
        Source::Cambridge
    }

    async fn lookup(&self, word: &str) -> anyhow::Result<Option<SourceUpdate>> {
        let entry = self.fetcher.fetch(word).await?;
        if let Some(entry) = &entry {
            tracing::info!("  -> Found {} meanings.", entry.meanings.len());
        }
        Ok(entry.map(SourceUpdate::Cambridge))
    }

    fn pause(&self) -> Duration {
        let min = self.pause_min.as_millis() as u64;
        let max = self.pause_max.as_millis() as u64;
        Duration::from_millis(fastrand::u64(min..=max.max(min)))
    }
}

pub struct AnalyzerStep<A> {
    analyzer: A,
    pause: Duration,
}

impl<A: Analyzer> AnalyzerStep<A> {
    pub fn new(analyzer: A, pause: Duration) -> Self {
        Self { analyzer, pause }
    }
}

#[async_trait::async_trait]
impl<A: Analyzer> EnrichmentStep for AnalyzerStep<A> {
    fn source(&self) -> Source {
        Source::Analysis
    }

    async fn lookup(&self, word: &str) -> anyhow::Result<Option<SourceUpdate>> {
        match self.analyzer.analyze(word).await {
            Ok(analysis) => Ok(Some(SourceUpdate::Analysis(analysis))),
            Err(AnalyzeError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn pause(&self) -> Duration {
        self.pause
    }
}
