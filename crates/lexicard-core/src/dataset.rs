use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lexicard_types::WordRecord;

use crate::error::DatasetError;

/// The persisted word records, rewritten wholesale on every save
pub struct Dataset {
    path: PathBuf,
    records: Vec<WordRecord>,
}

impl Dataset {
    /// Load an existing dataset; a missing file is an error
    pub fn open(path: &Path) -> Result<Self, DatasetError> {
        let data = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => DatasetError::FileNotFound(path.to_path_buf()),
            _ => DatasetError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let records: Vec<WordRecord> =
            serde_json::from_str(&data).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Load the dataset, starting empty when the file does not exist yet
    pub fn open_or_create(path: &Path) -> Result<Self, DatasetError> {
        match Self::open(path) {
            Err(DatasetError::FileNotFound(_)) => {
                tracing::info!("No dataset at {}, starting empty", path.display());
                Ok(Self::in_memory(path, Vec::new()))
            }
            other => other,
        }
    }

    pub fn in_memory(path: &Path, records: Vec<WordRecord>) -> Self {
        Self {
            path: path.to_path_buf(),
            records,
        }
    }

    /// Write all records as a pretty-printed JSON array
    pub fn save(&self) -> Result<(), DatasetError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [WordRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.word.as_str())
    }

    /// Append a fresh record for each word not already present (ignoring case).
    /// Existing records are left untouched. Returns how many were added.
    pub fn add_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: HashSet<String> = self.records.iter().map(WordRecord::key).collect();
        let before = self.records.len();

        for word in words {
            let word = word.into();
            if word.trim().is_empty() {
                continue;
            }
            if known.insert(word.to_lowercase()) {
                self.records.push(WordRecord::new(word));
            }
        }

        self.records.len() - before
    }

    /// Drop later records whose word repeats an earlier one (ignoring case).
    /// Records without a word are kept.
    pub fn dedup(&mut self) -> usize {
        let mut seen = HashSet::new();
        let before = self.records.len();
        self.records
            .retain(|record| record.word.trim().is_empty() || seen.insert(record.key()));
        before - self.records.len()
    }
}

/// Saves every `every` processed records so an interrupted run loses
/// at most that much work
pub struct FlushPolicy {
    every: usize,
    pending: usize,
}

impl FlushPolicy {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            pending: 0,
        }
    }

    /// Count one processed record and save when the interval is reached.
    /// Returns true when a save happened.
    pub fn tick(&mut self, dataset: &Dataset) -> Result<bool, DatasetError> {
        self.pending += 1;
        if self.pending < self.every {
            return Ok(false);
        }
        self.flush(dataset)?;
        Ok(true)
    }

    pub fn flush(&mut self, dataset: &Dataset) -> Result<(), DatasetError> {
        dataset.save()?;
        self.pending = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lexicard_types::QuizEntry;

    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");

        assert!(matches!(
            Dataset::open(&path),
            Err(DatasetError::FileNotFound(_))
        ));
        assert!(Dataset::open_or_create(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("words.json");

        let mut record = WordRecord::new("café");
        record.quiz = Some(QuizEntry {
            example: "A small café.".to_string(),
            target_word: "café".to_string(),
        });
        Dataset::in_memory(&path, vec![record.clone()]).save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("café"), "non-ASCII must not be escaped");
        assert!(text.starts_with("[\n  {"));

        let reopened = Dataset::open(&path).unwrap();
        assert_eq!(reopened.records(), &[record]);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(Dataset::open(&path), Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn test_add_words_skips_known_words() {
        let mut dataset = Dataset::in_memory(Path::new("unused.json"), vec![WordRecord::new("Run")]);

        let added = dataset.add_words(["run", "walk", "WALK", ""]);

        assert_eq!(added, 1);
        assert_eq!(dataset.words().collect::<Vec<_>>(), vec!["Run", "walk"]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut dataset = Dataset::in_memory(
            Path::new("unused.json"),
            vec![WordRecord::new("Cat"), WordRecord::new("dog"), WordRecord::new("cat")],
        );

        assert_eq!(dataset.dedup(), 1);
        assert_eq!(dataset.words().collect::<Vec<_>>(), vec!["Cat", "dog"]);
    }

    #[test]
    fn test_dedup_keeps_records_without_word() {
        let mut dataset = Dataset::in_memory(
            Path::new("unused.json"),
            vec![WordRecord::new(""), WordRecord::new("cat"), WordRecord::new("")],
        );

        assert_eq!(dataset.dedup(), 0);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_record_missing_word_does_not_fail_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"[{"analysis": null}, {"word": "cat", "analysis": null}]"#).unwrap();

        let dataset = Dataset::open(&path).unwrap();
        assert_eq!(dataset.words().collect::<Vec<_>>(), vec!["", "cat"]);
    }

    #[test]
    fn test_flush_policy_saves_on_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let dataset = Dataset::in_memory(&path, vec![WordRecord::new("cat")]);
        let mut policy = FlushPolicy::new(3);

        assert!(!policy.tick(&dataset).unwrap());
        assert!(!policy.tick(&dataset).unwrap());
        assert!(!path.exists());
        assert!(policy.tick(&dataset).unwrap());
        assert!(path.exists());
        assert!(!policy.tick(&dataset).unwrap());
    }
}
