use std::time::Duration;

use lexicard_config::batch::BatchConfig;
use lexicard_core::{Dataset, DatasetError, FlushPolicy, Source, SourceUpdate};

/// One external source filling one slot of each record
#[async_trait::async_trait]
pub trait EnrichmentStep: Send + Sync {
    fn source(&self) -> Source;

    /// `Ok(None)` when the source has nothing for the word
    async fn lookup(&self, word: &str) -> anyhow::Result<Option<SourceUpdate>>;

    /// Delay after each lookup
    fn pause(&self) -> Duration;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub processed: usize,
    pub updated: usize,
    /// Lookups that returned exactly what the record already held
    pub unchanged: usize,
    pub not_found: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Look up every record against one source, in dataset order.
///
/// Records already holding the source's data are skipped unless
/// `batch.force`. Per-record failures are logged and counted; only a
/// failed save aborts the pass. The dataset is saved every
/// `batch.flush_every` lookups and once more at the end.
pub async fn run_source<S: EnrichmentStep + ?Sized>(
    step: &S,
    dataset: &mut Dataset,
    batch: &BatchConfig,
) -> Result<PassReport, DatasetError> {
    let source = step.source();
    let total = dataset.len();
    let mut flush = FlushPolicy::new(batch.flush_every);
    let mut report = PassReport::default();

    tracing::info!("Starting {} pass over {} records", source.name(), total);

    for i in 0..total {
        if batch.limit.is_some_and(|limit| report.processed >= limit) {
            tracing::info!("Reached limit of {} records", report.processed);
            break;
        }

        let record = &dataset.records()[i];
        if record.word.trim().is_empty()
            || (!batch.force && source.is_populated(record))
        {
            report.skipped += 1;
            continue;
        }
        let word = record.word.clone();

        tracing::info!("[{}/{}] {}: {}", i + 1, total, source.name(), word);
        report.processed += 1;

        match step.lookup(&word).await {
            Ok(Some(update)) => {
                if update.apply(&mut dataset.records_mut()[i]) {
                    report.updated += 1;
                } else {
                    tracing::debug!("{} data for {} unchanged", source.name(), word);
                    report.unchanged += 1;
                }
            }
            Ok(None) => {
                tracing::info!("No {} data for {}", source.name(), word);
                report.not_found += 1;
            }
            Err(e) => {
                tracing::warn!("{} lookup failed for {}: {:#}", source.name(), word, e);
                report.failed += 1;
            }
        }

        if flush.tick(dataset)? {
            tracing::info!(
                "Saving progress... ({} updated so far)",
                report.updated
            );
        }

        let pause = step.pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    flush.flush(dataset)?;
    tracing::info!(
        "{} pass done: {} updated, {} unchanged, {} not found, {} failed, {} skipped",
        source.name(),
        report.updated,
        report.unchanged,
        report.not_found,
        report.failed,
        report.skipped
    );

    Ok(report)
}
