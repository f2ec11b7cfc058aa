//! In-memory WordNet built from an exported lexical resource.
//!
//! The resource is a JSON document with `entries`, `synsets` and optional
//! per-POS `exceptions` (the `.exc` irregular forms). Lookups go through
//! indices built once at load time.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use lexicard_core::PartOfSpeech;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum WordNetError {
    #[error("Cannot read WordNet data {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid WordNet data {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SynsetPos {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a")]
    Adjective,
    /// Adjective satellite
    #[serde(rename = "s")]
    Satellite,
    #[serde(rename = "r")]
    Adverb,
}

impl SynsetPos {
    pub fn part_of_speech(self) -> PartOfSpeech {
        match self {
            SynsetPos::Noun => PartOfSpeech::Noun,
            SynsetPos::Verb => PartOfSpeech::Verb,
            SynsetPos::Adjective | SynsetPos::Satellite => PartOfSpeech::Adjective,
            SynsetPos::Adverb => PartOfSpeech::Adverb,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SynsetPos::Noun => "Noun",
            SynsetPos::Verb => "Verb",
            SynsetPos::Adjective | SynsetPos::Satellite => "Adjective",
            SynsetPos::Adverb => "Adverb",
        }
    }

    /// Lookup order across parts of speech: nouns, verbs, adjectives, adverbs
    fn rank(self) -> u8 {
        match self {
            SynsetPos::Noun => 0,
            SynsetPos::Verb => 1,
            SynsetPos::Adjective | SynsetPos::Satellite => 2,
            SynsetPos::Adverb => 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexicalEntry {
    pub id: String,
    /// Written form; multi-word lemmas use spaces
    pub lemma: String,
    pub pos: SynsetPos,
    /// Most frequent sense first
    #[serde(default)]
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sense {
    pub id: String,
    pub synset: String,
    #[serde(default)]
    pub relations: Vec<SenseRelation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SenseRelation {
    pub rel_type: SenseRelType,
    /// Target sense id
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseRelType {
    Derivation,
    Antonym,
    Pertainym,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Synset {
    pub id: String,
    pub pos: SynsetPos,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    /// Mandarin lemmas of the same concept
    #[serde(default)]
    pub translations: Vec<String>,
}

impl Synset {
    pub fn definition(&self) -> &str {
        self.definitions.first().map(String::as_str).unwrap_or("")
    }

    pub fn first_example(&self) -> Option<&str> {
        self.examples
            .iter()
            .map(String::as_str)
            .find(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LexicalResource {
    #[serde(default)]
    pub entries: Vec<LexicalEntry>,
    #[serde(default)]
    pub synsets: Vec<Synset>,
    /// Irregular form to base forms, per part of speech
    #[serde(default)]
    pub exceptions: HashMap<SynsetPos, HashMap<String, Vec<String>>>,
}

/// Word related to a synset member through a sense relation
#[derive(Debug, Clone, Copy)]
pub struct RelatedWord<'a> {
    pub entry: &'a LexicalEntry,
    pub synset: &'a Synset,
}

pub struct WordNet {
    entries: Vec<LexicalEntry>,
    synsets: HashMap<String, Synset>,
    exceptions: HashMap<SynsetPos, HashMap<String, Vec<String>>>,

    // lemma (lowercase) -> entry positions, file order
    lemma_index: HashMap<String, Vec<usize>>,
    // sense id -> (entry position, sense position)
    sense_index: HashMap<String, (usize, usize)>,
    // synset id -> member sense ids
    synset_members: HashMap<String, Vec<String>>,
    // word (lowercase) -> multi-word entries containing it
    phrase_index: HashMap<String, Vec<usize>>,
}

impl WordNet {
    pub fn load(path: &Path) -> Result<Self, WordNetError> {
        tracing::info!("Loading WordNet data from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| WordNetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let resource: LexicalResource =
            serde_json::from_str(&data).map_err(|source| WordNetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::build(resource))
    }

    pub fn build(resource: LexicalResource) -> Self {
        let mut wordnet = WordNet {
            entries: resource.entries,
            synsets: resource
                .synsets
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
            exceptions: resource.exceptions,
            lemma_index: HashMap::new(),
            sense_index: HashMap::new(),
            synset_members: HashMap::new(),
            phrase_index: HashMap::new(),
        };

        for (i, entry) in wordnet.entries.iter().enumerate() {
            let lemma = entry.lemma.to_lowercase();

            if lemma.contains(' ') {
                let parts: HashSet<&str> = lemma.split_whitespace().collect();
                for part in parts {
                    wordnet
                        .phrase_index
                        .entry(part.to_string())
                        .or_default()
                        .push(i);
                }
            }
            wordnet.lemma_index.entry(lemma).or_default().push(i);

            for (j, sense) in entry.senses.iter().enumerate() {
                wordnet.sense_index.insert(sense.id.clone(), (i, j));
                if !wordnet.synsets.contains_key(&sense.synset) {
                    tracing::warn!(
                        "Sense '{}' points at unknown synset '{}'",
                        sense.id,
                        sense.synset
                    );
                    continue;
                }
                wordnet
                    .synset_members
                    .entry(sense.synset.clone())
                    .or_default()
                    .push(sense.id.clone());
            }
        }

        tracing::info!(
            "WordNet ready: {} entries, {} synsets",
            wordnet.entries.len(),
            wordnet.synsets.len()
        );
        wordnet
    }

    /// Synsets of `word`: nouns, verbs, adjectives then adverbs, each in
    /// sense order
    pub fn synsets(&self, word: &str) -> Vec<&Synset> {
        let Some(positions) = self.lemma_index.get(&word.trim().to_lowercase()) else {
            return Vec::new();
        };

        let mut entries: Vec<&LexicalEntry> = positions.iter().map(|&i| &self.entries[i]).collect();
        entries.sort_by_key(|entry| entry.pos.rank());

        let mut seen = HashSet::new();
        entries
            .into_iter()
            .flat_map(|entry| entry.senses.iter())
            .filter(|sense| seen.insert(sense.synset.as_str()))
            .filter_map(|sense| self.synsets.get(&sense.synset))
            .collect()
    }

    pub fn synset(&self, id: &str) -> Option<&Synset> {
        self.synsets.get(id)
    }

    /// Entries whose senses belong to `synset`, in membership order
    pub fn members(&self, synset: &Synset) -> Vec<&LexicalEntry> {
        self.member_senses(synset)
            .map(|(entry, _)| entry)
            .collect()
    }

    /// Words reached from the members of `synset` through `rel_type`
    pub fn related(&self, synset: &Synset, rel_type: SenseRelType) -> Vec<RelatedWord<'_>> {
        let mut related = Vec::new();
        for (_, sense) in self.member_senses(synset) {
            for relation in sense.relations.iter().filter(|r| r.rel_type == rel_type) {
                let Some((entry, target)) = self.sense(&relation.target) else {
                    tracing::debug!("Relation target '{}' not found", relation.target);
                    continue;
                };
                if let Some(synset) = self.synsets.get(&target.synset) {
                    related.push(RelatedWord { entry, synset });
                }
            }
        }
        related
    }

    /// Multi-word lemmas that contain `word` as a whole word
    pub fn phrases(&self, word: &str) -> Vec<&LexicalEntry> {
        self.phrase_index
            .get(&word.trim().to_lowercase())
            .map(|positions| positions.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Every single-word lemma with its part of speech
    pub fn lemmas(&self) -> impl Iterator<Item = (&str, PartOfSpeech)> {
        self.entries
            .iter()
            .filter(|entry| !entry.lemma.contains(' '))
            .map(|entry| (entry.lemma.as_str(), entry.pos.part_of_speech()))
    }

    /// Irregular forms as (pos, form, base)
    pub fn exceptions(&self) -> impl Iterator<Item = (PartOfSpeech, &str, &str)> {
        self.exceptions.iter().flat_map(|(pos, table)| {
            table.iter().flat_map(move |(form, bases)| {
                bases
                    .iter()
                    .map(move |base| (pos.part_of_speech(), form.as_str(), base.as_str()))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sense(&self, id: &str) -> Option<(&LexicalEntry, &Sense)> {
        let &(i, j) = self.sense_index.get(id)?;
        let entry = &self.entries[i];
        Some((entry, &entry.senses[j]))
    }

    fn member_senses(&self, synset: &Synset) -> impl Iterator<Item = (&LexicalEntry, &Sense)> {
        self.synset_members
            .get(&synset.id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.sense(id))
    }
}
