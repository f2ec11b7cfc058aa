/// Text processing interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "en", ...)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, whitespace, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into word-level tokens; punctuation becomes its own token
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Assign a Penn Treebank tag to every token, in order
    fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken>;

    /// Reduce a lowercase word to its dictionary form under `pos`
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;
}

/// Reduction of inflected forms to base forms
pub trait Lemmatizer: Send + Sync {
    /// Candidate base forms in rule order, unfiltered
    fn candidates(&self, word: &str, pos: PartOfSpeech) -> Vec<LemmaCandidate>;

    /// Best known base form, or the word itself when nothing is known
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text exactly as it appears in the source
    pub surface: String,
    pub normalized: String,
    /// Byte offset of `surface` in the source
    pub position: usize,
}

impl Token {
    pub fn new(surface: &str, position: usize) -> Self {
        Self {
            surface: surface.to_string(),
            normalized: surface.to_lowercase(),
            position,
        }
    }

    /// True when every char is alphanumeric
    pub fn is_alphanumeric(&self) -> bool {
        !self.surface.is_empty() && self.surface.chars().all(char::is_alphanumeric)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaCandidate {
    pub base_form: String,
    /// Which rule produced it, e.g. "verb: -ing"
    pub rule: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Map a Treebank tag by its first letter; anything unknown is a noun
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => PartOfSpeech::Adjective,
            Some('V') => PartOfSpeech::Verb,
            Some('N') => PartOfSpeech::Noun,
            Some('R') => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Noun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treebank_prefix_mapping() {
        assert_eq!(PartOfSpeech::from_treebank("JJR"), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::from_treebank("VBZ"), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::from_treebank("NNS"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_treebank("RB"), PartOfSpeech::Adverb);
        assert_eq!(PartOfSpeech::from_treebank("PRP"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_treebank(""), PartOfSpeech::Noun);
    }

    #[test]
    fn test_alphanumeric_tokens() {
        assert!(Token::new("runs", 3).is_alphanumeric());
        assert!(Token::new("B2", 0).is_alphanumeric());
        assert!(!Token::new("n't", 0).is_alphanumeric());
        assert!(!Token::new(".", 0).is_alphanumeric());
        assert!(!Token::new("well-known", 0).is_alphanumeric());
    }
}
