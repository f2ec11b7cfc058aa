use std::collections::{HashMap, HashSet};

use lexicard_core::PartOfSpeech;

/// Known base forms; a lemma candidate only counts when it is listed here.
///
/// Plain words are valid under every part of speech. Words added with
/// [`Lexicon::insert_as`] are valid only under the given one.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashSet<String>,
    tagged: HashMap<PartOfSpeech, HashSet<String>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// One word per line; blank lines and `#` comments are ignored
    pub fn from_lines(text: &str) -> Self {
        let mut lexicon = Self::new();
        lexicon.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        lexicon
    }

    /// Known under any part of speech
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.tagged.values().any(|set| set.contains(word))
    }

    pub fn contains_as(&self, word: &str, pos: PartOfSpeech) -> bool {
        self.words.contains(word) || self.is_tagged(word, pos)
    }

    /// Listed specifically under `pos`, plain entries not counted
    pub fn is_tagged(&self, word: &str, pos: PartOfSpeech) -> bool {
        self.tagged.get(&pos).is_some_and(|set| set.contains(word))
    }

    /// Add a word, lowercased. Returns false if it was already known.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word)
    }

    /// Add a word known only under `pos`
    pub fn insert_as(&mut self, word: &str, pos: PartOfSpeech) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return false;
        }
        self.tagged.entry(pos).or_default().insert(word)
    }

    /// Add words, returning how many were new
    pub fn extend<'a, I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        words.into_iter().filter(|w| self.insert(w)).count()
    }

    pub fn merge(mut self, other: Lexicon) -> Self {
        self.words.extend(other.words);
        for (pos, set) in other.tagged {
            self.tagged.entry(pos).or_default().extend(set);
        }
        self
    }

    /// Distinct words across plain and tagged entries
    pub fn len(&self) -> usize {
        let mut all: HashSet<&str> = self.words.iter().map(String::as_str).collect();
        for set in self.tagged.values() {
            all.extend(set.iter().map(String::as_str));
        }
        all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.tagged.values().all(HashSet::is_empty)
    }
}
