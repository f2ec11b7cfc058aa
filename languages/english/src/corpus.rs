use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use lexicard_analyzer::{AnalyzeError, Analyzer, ProviderMetadata};
use lexicard_types::{Analysis, MeaningEntry, PhraseEntry, WordFamilyEntry};

use crate::wordnet::{SenseRelType, Synset, WordNet};

const LESS_COMMON_LIMIT: usize = 3;
const FAMILY_LIMIT: usize = 5;
const PHRASE_LIMIT: usize = 5;

/// Word analysis read from WordNet instead of a model
pub struct CorpusAnalyzer {
    wordnet: Arc<WordNet>,
}

impl CorpusAnalyzer {
    pub fn new(wordnet: Arc<WordNet>) -> Self {
        Self { wordnet }
    }

    /// First synset is the most common meaning, the next three the less
    /// common ones. `None` when WordNet does not know the word.
    pub fn analysis_for(&self, word: &str) -> Option<Analysis> {
        let synsets = self.wordnet.synsets(word);
        let (primary, rest) = synsets.split_first()?;

        Some(Analysis {
            most_common_meaning: Some(meaning(primary)),
            less_common_meanings: rest.iter().take(LESS_COMMON_LIMIT).map(|s| meaning(s)).collect(),
            word_family: self.word_family(primary),
            related_phrases: self.related_phrases(word),
        })
    }

    fn word_family(&self, synset: &Synset) -> Vec<WordFamilyEntry> {
        let members: HashSet<String> = self
            .wordnet
            .members(synset)
            .iter()
            .map(|entry| entry.lemma.to_lowercase())
            .collect();

        let mut seen = HashSet::new();
        self.wordnet
            .related(synset, SenseRelType::Derivation)
            .into_iter()
            .filter(|related| {
                let lemma = related.entry.lemma.to_lowercase();
                !members.contains(&lemma) && seen.insert(lemma)
            })
            .take(FAMILY_LIMIT)
            .map(|related| WordFamilyEntry {
                word: related.entry.lemma.clone(),
                part_of_speech: related.entry.pos.label().to_string(),
                definition: short_definition(related.synset),
            })
            .collect()
    }

    fn related_phrases(&self, word: &str) -> Vec<PhraseEntry> {
        self.wordnet
            .phrases(word)
            .into_iter()
            .filter_map(|entry| {
                let sense = entry.senses.first()?;
                let synset = self.wordnet.synset(&sense.synset)?;
                Some(PhraseEntry {
                    phrase: entry.lemma.clone(),
                    definition: bilingual_definition(synset),
                    example: synset.first_example().map(str::to_string),
                })
            })
            .take(PHRASE_LIMIT)
            .collect()
    }
}

#[async_trait]
impl Analyzer for CorpusAnalyzer {
    async fn analyze(&self, word: &str) -> Result<Analysis, AnalyzeError> {
        self.analysis_for(word)
            .ok_or_else(|| AnalyzeError::NotFound(word.to_string()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "wordnet".to_string(),
            model: format!("{} entries", self.wordnet.len()),
            requires_api_key: false,
        }
    }
}

fn meaning(synset: &Synset) -> MeaningEntry {
    MeaningEntry {
        part_of_speech: synset.pos.label().to_string(),
        definition: bilingual_definition(synset),
        example: synset.first_example().map(str::to_string),
    }
}

/// "跑, 奔跑 (move fast)" when translations exist, else the English gloss
fn bilingual_definition(synset: &Synset) -> String {
    let translations = sorted_translations(synset);
    if translations.is_empty() {
        return synset.definition().to_string();
    }
    format!("{} ({})", translations.join(", "), synset.definition())
}

/// Translations alone when present
fn short_definition(synset: &Synset) -> String {
    let translations = sorted_translations(synset);
    if translations.is_empty() {
        return synset.definition().to_string();
    }
    translations.join(", ")
}

fn sorted_translations(synset: &Synset) -> Vec<&str> {
    let mut translations: Vec<&str> = synset
        .translations
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    translations.sort_unstable();
    translations.dedup();
    translations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordnet::tests::sample;

    fn analyzer() -> CorpusAnalyzer {
        CorpusAnalyzer::new(Arc::new(sample()))
    }

    #[test]
    fn test_analysis_from_synsets() {
        let analysis = analyzer().analysis_for("run").unwrap();

        let most = analysis.most_common_meaning.unwrap();
        assert_eq!(most.part_of_speech, "Noun");
        assert_eq!(most.definition, "a score in baseball");
        assert_eq!(most.example(), None);

        assert_eq!(analysis.less_common_meanings.len(), 2);
        assert_eq!(
            analysis.less_common_meanings[0].definition,
            "奔跑, 跑 (move fast by using one's feet)"
        );
        assert_eq!(
            analysis.less_common_meanings[1].example(),
            Some("She runs a small business")
        );
    }

    #[test]
    fn test_word_family_from_derivations() {
        let analysis = analyzer().analysis_for("runner").unwrap();

        assert_eq!(analysis.word_family.len(), 1);
        let family = &analysis.word_family[0];
        assert_eq!(family.word, "run");
        assert_eq!(family.part_of_speech, "Verb");
        assert_eq!(family.definition, "奔跑, 跑");
    }

    #[test]
    fn test_related_phrases() {
        let analysis = analyzer().analysis_for("run").unwrap();

        assert_eq!(analysis.related_phrases.len(), 1);
        let phrase = &analysis.related_phrases[0];
        assert_eq!(phrase.phrase, "run out");
        assert_eq!(phrase.definition, "use up a resource");
        assert_eq!(phrase.example.as_deref(), Some("We ran out of milk"));
    }

    #[tokio::test]
    async fn test_unknown_word_is_not_found() {
        let result = analyzer().analyze("quokka").await;

        assert!(matches!(result, Err(AnalyzeError::NotFound(word)) if word == "quokka"));
    }

    #[test]
    fn test_needs_no_api_key() {
        assert!(!analyzer().metadata().requires_api_key);
    }
}
