use std::fs;
use std::path::Path;

use lexicard_config::Config;
use lexicard_config::analyzer::AnalyzerProvider;
use lexicard_core::Dataset;
use lexicard_types::{CambridgeEntry, CambridgeMeaning, QuizEntry, WordRecord};

use crate::commands::{analyze, coverage, enrich, fetch, populate};

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.paths.word_list = dir.join("extracted.txt");
    config.paths.dataset = dir.join("data").join("words.json");
    config
}

const WORDNET: &str = r#"{
  "entries": [
    {"id": "w1", "lemma": "run", "pos": "v", "senses": [{"id": "run-v-1", "synset": "s-run-v-1"}]},
    {"id": "w2", "lemma": "glorp", "pos": "v", "senses": [{"id": "glorp-v-1", "synset": "s-glorp-v-1"}]}
  ],
  "synsets": [
    {"id": "s-run-v-1", "pos": "v", "definitions": ["move fast by using one's feet"], "examples": ["He ran home"], "translations": ["跑"]},
    {"id": "s-glorp-v-1", "pos": "v", "definitions": ["make a wet noise"]}
  ],
  "exceptions": {"v": {"gleeped": ["glorp"]}}
}"#;

fn with_wordnet(dir: &Path) -> Config {
    let mut config = config_in(dir);
    let path = dir.join("wordnet.json");
    fs::write(&path, WORDNET).unwrap();
    config.wordnet.path = Some(path);
    config
}

fn with_example(word: &str, example: &str) -> WordRecord {
    let mut record = WordRecord::new(word);
    record.cambridge = Some(CambridgeEntry {
        meanings: vec![CambridgeMeaning {
            definition: "def".to_string(),
            examples: vec![example.to_string()],
        }],
        url: format!("https://dict.test/{word}"),
    });
    record
}

#[test]
fn test_populate_creates_and_extends_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.paths.word_list, "run\n  Apple\n\n2024\nrun\n").unwrap();

    assert_eq!(populate(&config).unwrap(), 2);

    let mut dataset = Dataset::open(&config.paths.dataset).unwrap();
    assert_eq!(dataset.words().collect::<Vec<_>>(), vec!["Apple", "run"]);

    dataset.records_mut()[1].quiz = Some(QuizEntry {
        example: "We run.".to_string(),
        target_word: "run".to_string(),
    });
    dataset.save().unwrap();
    fs::write(&config.paths.word_list, "apple\nrun\nzebra\n").unwrap();

    assert_eq!(populate(&config).unwrap(), 1);

    let dataset = Dataset::open(&config.paths.dataset).unwrap();
    assert_eq!(dataset.len(), 3);
    assert!(dataset.records()[1].quiz.is_some());
}

#[test]
fn test_populate_removes_duplicate_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut analyzed = WordRecord::new("run");
    analyzed.analysis = Some(Default::default());
    Dataset::in_memory(
        &config.paths.dataset,
        vec![analyzed, WordRecord::new("cat"), WordRecord::new("Run")],
    )
    .save()
    .unwrap();
    fs::write(&config.paths.word_list, "run
dog
").unwrap();

    assert_eq!(populate(&config).unwrap(), 1);

    let dataset = Dataset::open(&config.paths.dataset).unwrap();
    assert_eq!(dataset.words().collect::<Vec<_>>(), vec!["run", "cat", "dog"]);
    assert!(dataset.records()[0].analysis.is_some());
}

#[test]
fn test_populate_without_word_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = populate(&config).unwrap_err();
    assert!(err.to_string().contains("cannot read word list"));
}

#[test]
fn test_enrich_then_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    Dataset::in_memory(
        &config.paths.dataset,
        vec![
            with_example("run", "He runs fast."),
            with_example("dog", "The cats are sleeping."),
            WordRecord::new("empty"),
        ],
    )
    .save()
    .unwrap();

    let report = enrich(&config).unwrap();
    assert_eq!(report.located, 1);
    assert_eq!(report.missed, 1);
    assert_eq!(report.no_example, 1);

    let dataset = Dataset::open(&config.paths.dataset).unwrap();
    assert_eq!(dataset.records()[0].quiz.as_ref().unwrap().target_word, "runs");
    assert!(dataset.records()[1].quiz.is_none());

    let coverage = coverage(&config).unwrap();
    assert_eq!(coverage.total, 3);
    assert_eq!(coverage.quizzable, 1);
    assert_eq!(coverage.missing, 2);
}

#[test]
fn test_commands_need_a_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = coverage(&config).unwrap_err();
    assert!(format!("{err:#}").contains("lexicard populate"));
}

#[tokio::test]
async fn test_disabled_sources_do_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.dictionary.enabled = false;
    config.analyzer.enabled = false;

    assert_eq!(fetch(&config).await.unwrap().processed, 0);
    assert_eq!(analyze(&config).await.unwrap().processed, 0);
}

#[tokio::test]
async fn test_analyze_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.analyzer.api_key = String::new();

    let err = analyze(&config).await.unwrap_err();
    assert!(err.to_string().contains("API key not set"));
}

#[tokio::test]
async fn test_corpus_analyzer_needs_no_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = with_wordnet(dir.path());
    config.analyzer.provider = AnalyzerProvider::Corpus;
    config.analyzer.api_key = String::new();
    Dataset::in_memory(
        &config.paths.dataset,
        vec![WordRecord::new("run"), WordRecord::new("quokka")],
    )
    .save()
    .unwrap();

    let report = analyze(&config).await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.not_found, 1);
    assert_eq!(report.failed, 0);

    let dataset = Dataset::open(&config.paths.dataset).unwrap();
    let meaning = dataset.records()[0]
        .analysis
        .as_ref()
        .and_then(|a| a.most_common_meaning.as_ref())
        .unwrap();
    assert_eq!(meaning.definition, "跑 (move fast by using one's feet)");
    assert!(dataset.records()[1].analysis.is_none());
}

#[tokio::test]
async fn test_corpus_analyzer_reports_unreadable_wordnet() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.analyzer.provider = AnalyzerProvider::Corpus;
    config.wordnet.path = Some(dir.path().join("missing.json"));

    let err = analyze(&config).await.unwrap_err();
    assert!(err.to_string().contains("cannot load WordNet"));
}

#[test]
fn test_enrich_learns_wordnet_irregular_forms() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    Dataset::in_memory(
        &config.paths.dataset,
        vec![with_example("glorp", "They gleeped loudly.")],
    )
    .save()
    .unwrap();

    assert_eq!(enrich(&config).unwrap().located, 0);

    let config = with_wordnet(dir.path());
    assert_eq!(enrich(&config).unwrap().located, 1);

    let dataset = Dataset::open(&config.paths.dataset).unwrap();
    assert_eq!(dataset.records()[0].quiz.as_ref().unwrap().target_word, "gleeped");
}
