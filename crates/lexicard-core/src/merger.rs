//! Folds per-source data into word records and derives quiz entries.

use lexicard_types::{Analysis, CambridgeEntry, QuizEntry, WordRecord};

use crate::language::LanguageProcessor;
use crate::locator::{LocatedWord, Locator};

/// Slot of a [`WordRecord`] owned by one enrichment step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cambridge,
    Analysis,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::Cambridge => "cambridge",
            Source::Analysis => "analysis",
        }
    }

    pub fn is_populated(&self, record: &WordRecord) -> bool {
        match self {
            Source::Cambridge => record.cambridge.is_some(),
            Source::Analysis => record.analysis.is_some(),
        }
    }
}

/// Data produced by one source for one record
#[derive(Debug, Clone, PartialEq)]
pub enum SourceUpdate {
    Cambridge(CambridgeEntry),
    Analysis(Analysis),
}

impl SourceUpdate {
    /// Write into the update's own slot; sibling slots stay untouched.
    /// Returns false when the slot already held identical data.
    pub fn apply(self, record: &mut WordRecord) -> bool {
        match self {
            SourceUpdate::Cambridge(entry) => replace(&mut record.cambridge, entry),
            SourceUpdate::Analysis(analysis) => replace(&mut record.analysis, analysis),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

/// Example sentence that drives the quiz.
///
/// Dictionary meanings first, then the less common analysis meanings,
/// then the most common one.
pub fn select_example(record: &WordRecord) -> Option<&str> {
    if let Some(example) = record
        .cambridge
        .as_ref()
        .and_then(|c| c.meanings.iter().find_map(|m| m.first_example()))
    {
        return Some(example);
    }

    let analysis = record.analysis.as_ref()?;

    analysis
        .less_common_meanings
        .iter()
        .find_map(|m| m.example())
        .or_else(|| {
            analysis
                .most_common_meaning
                .as_ref()
                .and_then(|m| m.example())
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Located(LocatedWord),
    /// An example exists but the word could not be found in it
    Missed,
    NoExample,
    /// Record has an empty `word`
    Skipped,
}

/// Recompute `record.quiz` from scratch
pub fn enrich_record<P: LanguageProcessor + ?Sized>(
    locator: &Locator<'_, P>,
    record: &mut WordRecord,
) -> QuizOutcome {
    if record.word.trim().is_empty() {
        return QuizOutcome::Skipped;
    }

    let Some(example) = select_example(record) else {
        record.quiz = None;
        return QuizOutcome::NoExample;
    };

    match locator.find(&record.word, example) {
        Some(hit) => {
            tracing::debug!(word = %record.word, token = %hit.token, rule = hit.rule.as_str(), "located");
            record.quiz = Some(QuizEntry {
                example: example.to_string(),
                target_word: hit.token.clone(),
            });
            QuizOutcome::Located(hit)
        }
        None => {
            tracing::debug!("'{}' not found in '{}'", record.word, example);
            record.quiz = None;
            QuizOutcome::Missed
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichReport {
    pub total: usize,
    pub located: usize,
    pub missed: usize,
    pub no_example: usize,
    pub skipped: usize,
}

impl EnrichReport {
    fn record(&mut self, outcome: &QuizOutcome) {
        self.total += 1;
        match outcome {
            QuizOutcome::Located(_) => self.located += 1,
            QuizOutcome::Missed => self.missed += 1,
            QuizOutcome::NoExample => self.no_example += 1,
            QuizOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Regenerate quiz entries for every record, in order
pub fn enrich_records<P: LanguageProcessor + ?Sized>(
    locator: &Locator<'_, P>,
    records: &mut [WordRecord],
) -> EnrichReport {
    let mut report = EnrichReport::default();

    for (i, record) in records.iter_mut().enumerate() {
        if i % 500 == 0 {
            tracing::info!("Processed {i}...");
        }
        let outcome = enrich_record(locator, record);
        report.record(&outcome);
    }

    tracing::info!(
        "Enriched {} of {} words with quiz data ({} missed, {} without example)",
        report.located,
        report.total,
        report.missed,
        report.no_example
    );
    report
}
