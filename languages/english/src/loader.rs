use std::path::Path;

use crate::lexicon::Lexicon;

pub struct LexiconLoader;

impl LexiconLoader {
    /// Load embedded base word list
    pub fn load_embedded() -> Lexicon {
        let text = include_str!("../data/base_words.txt");
        let lexicon = Lexicon::from_lines(text);
        tracing::info!("Loaded {} embedded lexicon words", lexicon.len());
        lexicon
    }

    /// Load a word list from file path, one word per line
    pub fn load_from_file(path: &Path) -> std::io::Result<Lexicon> {
        tracing::info!("Loading lexicon from file: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let lexicon = Lexicon::from_lines(&text);
        tracing::info!("Loaded {} lexicon words from file", lexicon.len());
        Ok(lexicon)
    }

    /// Merge two lexicons
    pub fn merge(base: Lexicon, additional: Lexicon) -> Lexicon {
        base.merge(additional)
    }
}
