use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use lexicard_analyzer::{AnalyzeError, Analyzer};
use lexicard_config::Config;
use lexicard_config::analyzer::AnalyzerProvider;
use lexicard_core::merger::enrich_records;
use lexicard_core::preprocess::{DefaultPreprocessor, parse_word_list};
use lexicard_core::{CoverageReport, Dataset, EnrichReport, Locator};
use lexicard_dictionary::DictionaryFetcher;
use lexicard_lang_english::{
    CambridgeDictionary, CorpusAnalyzer, EnglishAnalyzer, EnglishProcessor, WordNet,
};

use crate::cli::Command;
use crate::pipeline::{PassReport, run_source};
use crate::steps::{AnalyzerStep, DictionaryStep};

pub async fn execute(command: &Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Populate { .. } => {
            populate(config)?;
        }
        Command::Fetch(_) => {
            fetch(config).await?;
        }
        Command::Analyze(_) => {
            analyze(config).await?;
        }
        Command::Enrich => {
            enrich(config)?;
        }
        Command::Coverage => {
            println!("{}", coverage(config)?);
        }
        Command::Run { .. } => run(config).await?,
    }
    Ok(())
}

/// Append records for new words from the word list. Returns how many were added.
pub fn populate(config: &Config) -> anyhow::Result<usize> {
    let path = &config.paths.word_list;
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read word list {}", path.display()))?;

    let words = parse_word_list(&DefaultPreprocessor, &text);
    tracing::info!("Read {} unique words from {}", words.len(), path.display());

    let mut dataset = Dataset::open_or_create(&config.paths.dataset)?;
    let removed = dataset.dedup();
    if removed > 0 {
        tracing::info!("Removed {} duplicate records", removed);
    }
    let added = dataset.add_words(words);
    dataset.save()?;

    tracing::info!(
        "Added {} new words, dataset now holds {} records",
        added,
        dataset.len()
    );
    Ok(added)
}

pub async fn fetch(config: &Config) -> anyhow::Result<PassReport> {
    let settings = &config.dictionary;
    if !settings.enabled {
        tracing::info!("Dictionary source disabled, skipping fetch");
        return Ok(PassReport::default());
    }

    let dictionary = CambridgeDictionary::new(
        &settings.base_url,
        &settings.user_agent,
        Duration::from_secs(settings.timeout_secs),
    )
    .context("failed to build dictionary client")?;
    let metadata = dictionary.metadata();
    tracing::info!("Fetching from {} ({})", metadata.name, metadata.language);

    let mut dataset = open_dataset(config)?;
    let step = DictionaryStep::new(dictionary, config.batch.pause_range());
    Ok(run_source(&step, &mut dataset, &config.batch).await?)
}

pub async fn analyze(config: &Config) -> anyhow::Result<PassReport> {
    let settings = &config.analyzer;
    if !settings.enabled {
        tracing::info!("Analyzer disabled, skipping analysis");
        return Ok(PassReport::default());
    }

    let (analyzer, pause): (Box<dyn Analyzer>, Duration) = match settings.provider {
        AnalyzerProvider::OpenAi => {
            let analyzer = EnglishAnalyzer::new(
                &settings.api_url,
                &settings.api_key,
                &settings.model,
                settings.temperature,
            );
            (Box::new(analyzer), config.batch.llm_pause())
        }
        AnalyzerProvider::Corpus => {
            let Some(path) = &config.wordnet.path else {
                bail!("the corpus analyzer needs wordnet.path or LEXICARD_WORDNET");
            };
            let wordnet = Arc::new(load_wordnet(path)?);
            (Box::new(CorpusAnalyzer::new(wordnet)), Duration::ZERO)
        }
    };

    let metadata = analyzer.metadata();
    if metadata.requires_api_key && settings.api_key.trim().is_empty() {
        bail!(AnalyzeError::ApiKeyNotSet);
    }
    tracing::info!("Analyzing with {} ({})", metadata.name, metadata.model);

    let mut dataset = open_dataset(config)?;
    let step = AnalyzerStep::new(analyzer, pause);
    Ok(run_source(&step, &mut dataset, &config.batch).await?)
}

/// Regenerate every quiz entry and save
pub fn enrich(config: &Config) -> anyhow::Result<EnrichReport> {
    let mut dataset = open_dataset(config)?;

    let mut processor = EnglishProcessor::with_additional_lexicons(&config.lexicon.additional_paths);
    if let Some(path) = &config.wordnet.path {
        processor.add_wordnet(&load_wordnet(path)?);
    }
    processor.ensure_words(dataset.words());

    let locator = Locator::new(&processor);
    let report = enrich_records(&locator, dataset.records_mut());
    dataset.save()?;

    Ok(report)
}

pub fn coverage(config: &Config) -> anyhow::Result<CoverageReport> {
    let dataset = open_dataset(config)?;
    Ok(CoverageReport::from_records(dataset.records()))
}

/// Every stage in order; disabled sources and a missing API key skip their stage
pub async fn run(config: &Config) -> anyhow::Result<()> {
    populate(config)?;

    fetch(config).await?;

    if config.analyzer.enabled
        && config.analyzer.needs_api_key()
        && config.analyzer.api_key.trim().is_empty()
    {
        tracing::warn!("OPENAI_API_KEY not set, skipping analysis");
    } else {
        analyze(config).await?;
    }

    enrich(config)?;
    println!("{}", coverage(config)?);
    Ok(())
}

fn load_wordnet(path: &Path) -> anyhow::Result<WordNet> {
    let wordnet = WordNet::load(path)
        .with_context(|| format!("cannot load WordNet from {}", path.display()))?;
    tracing::info!("Loaded {} WordNet entries", wordnet.len());
    Ok(wordnet)
}

fn open_dataset(config: &Config) -> anyhow::Result<Dataset> {
    let path = &config.paths.dataset;
    Dataset::open(path).with_context(|| {
        format!(
            "cannot open dataset {}; run `lexicard populate` first",
            path.display()
        )
    })
}
