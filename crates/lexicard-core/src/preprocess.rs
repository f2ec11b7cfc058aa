use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default word-list line cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC), folds full-width letters and ligatures
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], "").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Parse a newline-delimited word list.
///
/// Empty lines and pure numbers are dropped, duplicates are removed
/// ignoring case (first spelling wins), and the result is sorted by its
/// lowercase form.
pub fn parse_word_list<P: Preprocessor + ?Sized>(preprocessor: &P, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words: Vec<String> = text
        .lines()
        .map(|line| preprocessor.process(line))
        .filter(|word| !word.is_empty())
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .filter(|word| seen.insert(word.to_lowercase()))
        .collect();

    words.sort_by_cached_key(|word| word.to_lowercase());
    words
}
