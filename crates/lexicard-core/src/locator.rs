//! Finds the token of an example sentence that realizes a given word.
//!
//! Three rules run in a fixed order and the first hit wins:
//! exact whitespace token, lemma match, then prefix match for words
//! longer than [`MIN_PREFIX_LEN`] characters.

use crate::language::{LanguageProcessor, PartOfSpeech, Token};

/// Words of this many chars or fewer never use the prefix rule
pub const MIN_PREFIX_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Lemma,
    Prefix,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Exact => "exact",
            MatchRule::Lemma => "lemma",
            MatchRule::Prefix => "prefix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedWord {
    /// Token text as written in the example
    pub token: String,
    pub rule: MatchRule,
}

pub struct Locator<'a, P: ?Sized> {
    processor: &'a P,
}

impl<'a, P: LanguageProcessor + ?Sized> Locator<'a, P> {
    pub fn new(processor: &'a P) -> Self {
        Self { processor }
    }

    /// Token of `example` that realizes `word`, if any
    pub fn locate(&self, word: &str, example: &str) -> Option<String> {
        self.find(word, example).map(|hit| hit.token)
    }

    /// Like [`Locator::locate`] but also reports which rule matched
    pub fn find(&self, word: &str, example: &str) -> Option<LocatedWord> {
        let word = word.trim();
        if word.is_empty() || example.trim().is_empty() {
            return None;
        }

        if let Some(token) = exact_match(word, example) {
            return Some(LocatedWord {
                token: token.to_string(),
                rule: MatchRule::Exact,
            });
        }

        let tokens = self.processor.tokenize(example);

        if let Some(token) = self.lemma_match(word, &tokens) {
            return Some(LocatedWord {
                token,
                rule: MatchRule::Lemma,
            });
        }

        prefix_match(word, &tokens).map(|token| LocatedWord {
            token,
            rule: MatchRule::Prefix,
        })
    }

    fn lemma_match(&self, word: &str, tokens: &[Token]) -> Option<String> {
        let target = word.to_lowercase();

        for tagged in self.processor.tag(tokens) {
            let token = &tagged.token;
            if !token.is_alphanumeric() {
                continue;
            }

            let pos = PartOfSpeech::from_treebank(&tagged.tag);
            let matched = [pos, PartOfSpeech::Verb, PartOfSpeech::Noun]
                .into_iter()
                .any(|pos| self.processor.lemmatize(&token.normalized, pos) == target);

            if matched {
                return Some(token.surface.clone());
            }
        }

        None
    }
}

/// Whitespace token equal to `word` ignoring case, original casing kept
pub fn exact_match<'e>(word: &str, example: &'e str) -> Option<&'e str> {
    let target = word.to_lowercase();
    example
        .split_whitespace()
        .find(|candidate| candidate.to_lowercase() == target)
}

/// First token starting with `word`, only for words longer than three chars
pub fn prefix_match(word: &str, tokens: &[Token]) -> Option<String> {
    if word.chars().count() <= MIN_PREFIX_LEN {
        return None;
    }

    let prefix = word.to_lowercase();
    tokens
        .iter()
        .find(|token| token.normalized.starts_with(&prefix))
        .map(|token| token.surface.clone())
}
