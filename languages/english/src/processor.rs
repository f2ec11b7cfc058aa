use std::path::PathBuf;

use lexicard_core::language::{LanguageProcessor, Lemmatizer, PartOfSpeech, TaggedToken, Token};
use unicode_normalization::UnicodeNormalization;

use crate::lemmatizer::EnglishLemmatizer;
use crate::loader::LexiconLoader;
use crate::tagger::HeuristicTagger;
use crate::tokenizer;
use crate::wordnet::WordNet;

/// English language processor
pub struct EnglishProcessor {
    lemmatizer: EnglishLemmatizer,
    tagger: HeuristicTagger,
}

impl EnglishProcessor {
    /// Create a new English processor with the embedded lexicon
    pub fn new() -> Self {
        Self::with_additional_lexicons(&[])
    }

    /// Create a new English processor with additional lexicon files
    pub fn with_additional_lexicons(additional_paths: &[PathBuf]) -> Self {
        let mut lexicon = LexiconLoader::load_embedded();

        for path in additional_paths {
            match LexiconLoader::load_from_file(path) {
                Ok(additional) => {
                    tracing::info!("Merging additional lexicon from: {}", path.display());
                    lexicon = LexiconLoader::merge(lexicon, additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load lexicon from {}: {}", path.display(), e);
                }
            }
        }

        Self {
            lemmatizer: EnglishLemmatizer::new(lexicon),
            tagger: HeuristicTagger::new(),
        }
    }

    /// Register words as known base forms. Returns how many were new.
    pub fn ensure_words<'a, I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let added = self.lemmatizer.lexicon_mut().extend(words);
        tracing::debug!(
            "Lexicon now holds {} words ({} added)",
            self.lemmatizer.lexicon().len(),
            added
        );
        added
    }

    /// Learn WordNet lemmas under their part of speech, plus its
    /// irregular forms. Returns how many entries were new.
    pub fn add_wordnet(&mut self, wordnet: &WordNet) -> usize {
        let mut added = 0;
        for (lemma, pos) in wordnet.lemmas() {
            if self.lemmatizer.lexicon_mut().insert_as(lemma, pos) {
                added += 1;
            }
        }
        for (pos, form, base) in wordnet.exceptions() {
            if self.lemmatizer.add_exception(pos, form, base) {
                added += 1;
            }
        }
        tracing::info!("Added {} WordNet lemmas and irregular forms", added);
        added
    }
}

impl Default for EnglishProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn language_code(&self) -> &str {
        "en"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfkc()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenizer::tokenize(text)
            .into_iter()
            .map(|mut token| {
                token.normalized = token.surface.nfkc().collect::<String>().to_lowercase();
                token
            })
            .collect()
    }

    fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        self.tagger.tag(tokens)
    }

    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        self.lemmatizer.lemmatize(word, pos)
    }
}
